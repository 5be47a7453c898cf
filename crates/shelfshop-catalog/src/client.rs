use std::time::Duration;

use reqwest::{Client, Url};
use shelfshop_core::{AppConfig, NormalizedProduct, StorefrontCredentials};

use crate::cache::RevalidationCache;
use crate::error::CatalogError;
use crate::normalize::normalize_products;
use crate::query::{clamp_count, featured_products_request, ACCESS_TOKEN_HEADER};
use crate::types::{GraphqlResponse, ProductsData};

/// HTTP client for the commerce platform's Storefront GraphQL API.
///
/// Sends one POST per fetch with the access token in a request header, maps
/// non-2xx statuses to [`CatalogError::Transport`] and GraphQL `errors` to
/// [`CatalogError::Protocol`], and reuses successful results for the
/// revalidation window. No retries are attempted.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    access_token: String,
    timeout_secs: u64,
    cache: RevalidationCache,
}

/// Builds `https://<domain>/api/<version>/graphql.json`.
///
/// Accepts a bare hostname, tolerating a leading `https://` and a trailing
/// slash. Anything with a path is rejected.
pub(crate) fn storefront_endpoint(store_domain: &str, api_version: &str) -> Result<Url, CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidStoreDomain {
        domain: store_domain.to_owned(),
        reason: reason.to_owned(),
    };

    let host = store_domain
        .trim()
        .strip_prefix("https://")
        .or_else(|| store_domain.trim().strip_prefix("http://"))
        .unwrap_or(store_domain.trim())
        .trim_end_matches('/');

    if host.is_empty() {
        return Err(invalid("domain is empty"));
    }
    if host.contains('/') || host.contains(char::is_whitespace) {
        return Err(invalid("expected a bare hostname"));
    }
    if api_version.is_empty() || api_version.contains('/') {
        return Err(invalid("API version must be a single path segment"));
    }

    let url = Url::parse(&format!("https://{host}/api/{api_version}/graphql.json"))
        .map_err(|e| invalid(&e.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

impl StorefrontClient {
    /// Creates a client for the store named in `credentials`.
    ///
    /// `revalidate_secs` is the window during which a successful result is
    /// reused; `0` disables reuse.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidStoreDomain`] if the domain does not
    /// form a valid endpoint URL, or [`CatalogError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        credentials: &StorefrontCredentials,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
        revalidate_secs: u64,
    ) -> Result<Self, CatalogError> {
        let endpoint = storefront_endpoint(&credentials.store_domain, api_version)?;
        Self::build(
            endpoint,
            &credentials.access_token,
            timeout_secs,
            user_agent,
            revalidate_secs,
        )
    }

    /// Creates a client posting to an explicit endpoint URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidStoreDomain`] if `endpoint` is not a
    /// valid URL, or [`CatalogError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        revalidate_secs: u64,
    ) -> Result<Self, CatalogError> {
        let endpoint = Url::parse(endpoint).map_err(|e| CatalogError::InvalidStoreDomain {
            domain: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Self::build(endpoint, access_token, timeout_secs, user_agent, revalidate_secs)
    }

    fn build(
        endpoint: Url,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        revalidate_secs: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
            timeout_secs,
            cache: RevalidationCache::new(Duration::from_secs(revalidate_secs)),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the most recently updated products, newest first.
    ///
    /// `count` is clamped into `1..=250`. The result keeps the API's order
    /// and never holds more than the requested count.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Transport`] — non-2xx status, with the raw body.
    /// - [`CatalogError::Protocol`] — 2xx with any non-null `errors` payload.
    /// - [`CatalogError::Timeout`] — no complete response within the timeout.
    /// - [`CatalogError::Http`] — network or TLS failure.
    /// - [`CatalogError::Deserialize`] — body is not a GraphQL envelope of
    ///   the expected shape.
    pub async fn fetch_featured_products(
        &self,
        count: u32,
    ) -> Result<Vec<NormalizedProduct>, CatalogError> {
        let first = clamp_count(count);

        if let Some(cached) = self.cache.get(first).await {
            tracing::debug!(first, "serving featured products from revalidation cache");
            return Ok(cached);
        }

        let request = featured_products_request(first);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "storefront request failed");
            return Err(CatalogError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: GraphqlResponse<ProductsData> =
            serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
                context: format!("featured products (first={first})"),
                source: e,
            })?;

        // Any non-null `errors` payload fails the call, including `[]`.
        if let Some(errors) = decoded.errors.as_ref() {
            let errors = errors.to_string();
            tracing::warn!(%errors, "storefront returned GraphQL errors");
            return Err(CatalogError::Protocol { errors });
        }

        let mut products = normalize_products(decoded);
        products.truncate(usize::try_from(first).unwrap_or(usize::MAX));

        tracing::debug!(first, returned = products.len(), "fetched featured products");
        self.cache.insert(first, products.clone()).await;
        Ok(products)
    }

    fn map_request_error(&self, error: reqwest::Error) -> CatalogError {
        if error.is_timeout() {
            tracing::warn!(timeout_secs = self.timeout_secs, "storefront request timed out");
            CatalogError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            CatalogError::Http(error)
        }
    }
}

/// Catalog entry point used by the storefront.
///
/// Wraps a [`StorefrontClient`] when credentials are configured. Without
/// them every fetch returns an empty list so the storefront still renders
/// during local development.
pub struct CatalogClient {
    live: Option<StorefrontClient>,
}

impl CatalogClient {
    /// Builds the catalog from application config.
    ///
    /// Missing credentials are not an error; they produce an unconfigured
    /// catalog and a warning.
    ///
    /// # Errors
    ///
    /// Propagates [`StorefrontClient::new`] failures when credentials exist.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        match config.storefront_credentials() {
            Some(credentials) => {
                let client = StorefrontClient::new(
                    &credentials,
                    &config.api_version,
                    config.request_timeout_secs,
                    &config.user_agent,
                    config.revalidate_secs,
                )?;
                tracing::info!(endpoint = %client.endpoint(), "storefront catalog configured");
                Ok(Self::live(client))
            }
            None => {
                tracing::warn!(
                    "SHOPIFY_STORE_DOMAIN or SHOPIFY_STOREFRONT_TOKEN not set; catalog will be empty"
                );
                Ok(Self::unconfigured())
            }
        }
    }

    #[must_use]
    pub fn live(client: StorefrontClient) -> Self {
        Self { live: Some(client) }
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self { live: None }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.live.is_some()
    }

    /// Fetches featured products, or an empty list when unconfigured.
    ///
    /// # Errors
    ///
    /// Propagates [`StorefrontClient::fetch_featured_products`] failures.
    pub async fn fetch_featured_products(
        &self,
        count: u32,
    ) -> Result<Vec<NormalizedProduct>, CatalogError> {
        let Some(live) = &self.live else {
            tracing::debug!(count, "storefront not configured; returning empty catalog");
            return Ok(Vec::new());
        };
        live.fetch_featured_products(count).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
