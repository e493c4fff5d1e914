use serde_json::Value;
use thiserror::Error;

/// Errors from the Store API client.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Store API answered with an error status; the payload is kept
    /// for relaying upstream.
    #[error("Store API error ({status})")]
    Api { status: u16, data: Value },

    /// Credentials were not configured for this deployment.
    #[error("Store API credentials unset (ECOM_AUTHENTICATION_ID / ECOM_API_KEY)")]
    MissingCredentials,

    #[error("invalid Store API url '{url}': {reason}")]
    Url { url: String, reason: String },

    /// A response did not match the documented shape.
    #[error("unexpected Store API payload: {0}")]
    Unexpected(String),
}
