use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the Datafrete quote client and normalizer.
#[derive(Debug, Error)]
pub enum DatafreteError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not decodable JSON, directly or after
    /// unwrapping a JSON-encoded string.
    #[error("undecodable Datafrete response body: {raw}")]
    InvalidBody { raw: String },

    /// Datafrete rejected the request or answered with an unexpected
    /// payload. The decoded body, when there is one, rides along so the
    /// caller can classify the failure.
    #[error("{message}")]
    Provider {
        status: Option<u16>,
        body: Option<Value>,
        message: String,
    },

    /// A quoted offer carried a value that does not parse as a number.
    #[error("non-numeric {field} in Datafrete offer: {raw}")]
    NonNumeric { field: &'static str, raw: String },
}
