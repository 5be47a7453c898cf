use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("storefront request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The API answered with a non-2xx status.
    #[error("storefront request failed: {status} {body}")]
    Transport { status: u16, body: String },

    /// The API answered 2xx but reported GraphQL errors.
    #[error("storefront GraphQL errors: {errors}")]
    Protocol { errors: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid store domain \"{domain}\": {reason}")]
    InvalidStoreDomain { domain: String, reason: String },
}

impl CatalogError {
    /// HTTP status of a [`CatalogError::Transport`] failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}
