use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default Storefront API version used when `SHOPIFY_API_VERSION` is unset.
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    // Blank values count as unset so `SHOPIFY_STORE_DOMAIN=` in a `.env`
    // file behaves like a missing variable.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SHELFSHOP_ENV", "development"))?;

    let bind_addr = parse_addr("SHELFSHOP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHELFSHOP_LOG_LEVEL", "info");

    let store_domain = optional("SHOPIFY_STORE_DOMAIN");
    let storefront_token = optional("SHOPIFY_STOREFRONT_TOKEN");
    let api_version = or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);

    let request_timeout_secs = parse_u64("SHELFSHOP_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "SHELFSHOP_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let revalidate_secs = parse_u64("SHELFSHOP_REVALIDATE_SECS", "60")?;
    let user_agent = or_default("SHELFSHOP_USER_AGENT", "shelfshop/0.1 (storefront)");

    let featured_count = or_default("SHELFSHOP_FEATURED_COUNT", "12")
        .parse::<u32>()
        .map_err(|e| invalid("SHELFSHOP_FEATURED_COUNT", e.to_string()))?;
    if featured_count == 0 {
        return Err(invalid(
            "SHELFSHOP_FEATURED_COUNT",
            "count must be a positive integer".to_string(),
        ));
    }

    let cart_path = PathBuf::from(or_default("SHELFSHOP_CART_PATH", "./data/cart.json"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        store_domain,
        storefront_token,
        api_version,
        request_timeout_secs,
        revalidate_secs,
        user_agent,
        featured_count,
        cart_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFSHOP_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
