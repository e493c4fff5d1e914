//! HTTP client for the Datafrete freight-quote API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::DatafreteError;
use crate::types::QuoteRequest;

/// Default quote endpoint; merchants can override it per store.
pub const DEFAULT_ENDPOINT: &str = "https://apresentacao.api.dev.datafreteapi.com";

/// Client for Datafrete's freight-quote endpoint.
///
/// Use [`DatafreteClient::new`] for production or
/// [`DatafreteClient::with_endpoint`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct DatafreteClient {
    client: Client,
    endpoint: Url,
}

impl DatafreteClient {
    /// Creates a client pointed at the default Datafrete endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DatafreteError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, DatafreteError> {
        Self::with_endpoint(timeout_secs, DEFAULT_ENDPOINT)
    }

    /// Creates a client with a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DatafreteError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DatafreteError::Provider`] if `endpoint`
    /// is not a valid URL.
    pub fn with_endpoint(timeout_secs: u64, endpoint: &str) -> Result<Self, DatafreteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("freightgate/0.1 (shipping-quotes)")
            .build()?;
        let endpoint = parse_endpoint(endpoint)?;
        Ok(Self { client, endpoint })
    }

    /// Posts a quote request and returns the decoded response body.
    ///
    /// `endpoint` overrides the configured URL for this call (merchant
    /// configuration may point individual stores at their own gateway).
    ///
    /// # Errors
    ///
    /// - [`DatafreteError::Http`] on network failure.
    /// - [`DatafreteError::InvalidBody`] when the body is not decodable
    ///   JSON.
    /// - [`DatafreteError::Provider`] on a non-2xx HTTP status; the decoded
    ///   body, when there is one, is attached for error classification.
    pub async fn quote(
        &self,
        request: &QuoteRequest,
        endpoint: Option<&str>,
    ) -> Result<Value, DatafreteError> {
        let url = match endpoint {
            Some(raw) => parse_endpoint(raw)?,
            None => self.endpoint.clone(),
        };
        tracing::debug!(url = %url, origin = %request.cep_origem, destination = %request.cep_destino, "requesting freight quote");

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if status.is_success() {
            decode_body(&raw)
        } else {
            Err(DatafreteError::Provider {
                status: Some(status.as_u16()),
                body: decode_body(&raw).ok(),
                message: format!("Datafrete request failed with status code {}", status.as_u16()),
            })
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, DatafreteError> {
    Url::parse(raw).map_err(|e| DatafreteError::Provider {
        status: None,
        body: None,
        message: format!("invalid Datafrete endpoint '{raw}': {e}"),
    })
}

/// Two-stage decode: parse the body as JSON, unwrapping one level of
/// JSON-encoded string if that is what came back.
fn decode_body(raw: &str) -> Result<Value, DatafreteError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| DatafreteError::InvalidBody {
        raw: raw.to_owned(),
    })?;
    match value {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|_| DatafreteError::InvalidBody { raw: inner.clone() }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_body_accepts_plain_objects() {
        let value = decode_body(r#"{"codigo_retorno": 1, "data": []}"#).expect("decode");
        assert_eq!(value["codigo_retorno"], 1);
    }

    #[test]
    fn decode_body_unwraps_json_encoded_strings() {
        let value = decode_body(r#""{\"codigo_retorno\": 1, \"data\": []}""#).expect("decode");
        assert_eq!(value["codigo_retorno"], 1);
    }

    #[test]
    fn decode_body_rejects_non_json_text() {
        let err = decode_body("gateway timeout").expect_err("must fail");
        assert!(
            matches!(err, DatafreteError::InvalidBody { ref raw } if raw == "gateway timeout"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn decode_body_rejects_string_without_json_inside() {
        let err = decode_body(r#""plain words""#).expect_err("must fail");
        assert!(
            matches!(err, DatafreteError::InvalidBody { ref raw } if raw == "plain words"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected_up_front() {
        let result = DatafreteClient::with_endpoint(5, "not a url");
        assert!(matches!(
            result,
            Err(DatafreteError::Provider { status: None, .. })
        ));
    }
}
