use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Store domain and Storefront access token, present only when both are set.
#[derive(Clone, PartialEq, Eq)]
pub struct StorefrontCredentials {
    /// Hostname of the commerce API, e.g. `"shelfco.myshopify.com"`.
    pub store_domain: String,
    pub access_token: String,
}

impl std::fmt::Debug for StorefrontCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontCredentials")
            .field("store_domain", &self.store_domain)
            .field("access_token", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub store_domain: Option<String>,
    pub storefront_token: Option<String>,
    pub api_version: String,
    pub request_timeout_secs: u64,
    /// Seconds a fetched catalog may be reused; `0` disables caching.
    pub revalidate_secs: u64,
    pub user_agent: String,
    pub featured_count: u32,
    pub cart_path: PathBuf,
}

impl AppConfig {
    /// Returns the live-call credentials, or `None` when either the store
    /// domain or the access token is missing.
    #[must_use]
    pub fn storefront_credentials(&self) -> Option<StorefrontCredentials> {
        match (&self.store_domain, &self.storefront_token) {
            (Some(domain), Some(token)) => Some(StorefrontCredentials {
                store_domain: domain.clone(),
                access_token: token.clone(),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("store_domain", &self.store_domain)
            .field(
                "storefront_token",
                &self.storefront_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("revalidate_secs", &self.revalidate_secs)
            .field("user_agent", &self.user_agent)
            .field("featured_count", &self.featured_count)
            .field("cart_path", &self.cart_path)
            .finish()
    }
}
