use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde_json::Value;

use crate::error::PlatformError;
use crate::types::Auth;

/// Client for the platform's Store API.
///
/// Holds the deployment-wide app credentials; per-store access tokens are
/// fetched with [`PlatformClient::get_auth`] and passed back into
/// [`PlatformClient::api_request`].
#[derive(Debug, Clone)]
pub struct PlatformClient {
    client: Client,
    base_url: Url,
    authentication_id: Option<String>,
    api_key: Option<String>,
}

/// Status and decoded body of a Store API response.
#[derive(Debug, Clone)]
pub struct ApiResult {
    pub status: u16,
    pub data: Value,
}

impl PlatformClient {
    /// Creates a client for the Store API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlatformError::Url`] if `base_url` is
    /// not a valid URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        authentication_id: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("freightgate/0.1 (shipping-quotes)")
            .build()?;

        // Keep exactly one trailing slash so joined paths extend the base
        // instead of replacing its last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| PlatformError::Url {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            authentication_id,
            api_key,
        })
    }

    /// Authenticates against the Store API and returns request credentials
    /// for `store_id`.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::MissingCredentials`] when the deployment has no
    ///   authentication id / API key configured.
    /// - [`PlatformError::Api`] when the Store API rejects the login.
    /// - [`PlatformError::Http`] on network failure.
    pub async fn get_auth(&self, store_id: u64) -> Result<Auth, PlatformError> {
        let (authentication_id, api_key) = self
            .authentication_id
            .as_deref()
            .zip(self.api_key.as_deref())
            .ok_or(PlatformError::MissingCredentials)?;

        let result = self
            .send(
                store_id,
                "_authenticate",
                Method::POST,
                Some(&serde_json::json!({
                    "_id": authentication_id,
                    "api_key": api_key,
                })),
                None,
            )
            .await?;

        serde_json::from_value(result.data)
            .map_err(|e| PlatformError::Unexpected(format!("_authenticate: {e}")))
    }

    /// Sends a request to the Store API on behalf of `store_id`.
    ///
    /// `path` is relative to the configured base URL and may carry a query
    /// string (`orders.json?number=100&limit=1`).
    ///
    /// # Errors
    ///
    /// - [`PlatformError::Api`] on a non-2xx answer, carrying the upstream
    ///   status and decoded body.
    /// - [`PlatformError::Http`] on network failure.
    pub async fn api_request(
        &self,
        store_id: u64,
        path: &str,
        method: Method,
        body: Option<&Value>,
        auth: &Auth,
    ) -> Result<ApiResult, PlatformError> {
        self.send(store_id, path, method, body, Some(auth)).await
    }

    async fn send(
        &self,
        store_id: u64,
        path: &str,
        method: Method,
        body: Option<&Value>,
        auth: Option<&Auth>,
    ) -> Result<ApiResult, PlatformError> {
        let url = self.base_url.join(path).map_err(|e| PlatformError::Url {
            url: path.to_owned(),
            reason: e.to_string(),
        })?;
        tracing::debug!(%method, url = %url, store_id, "Store API request");

        let mut request = self
            .client
            .request(method, url)
            .header("X-Store-ID", store_id.to_string());
        if let Some(auth) = auth {
            request = request
                .header("X-My-ID", &auth.my_id)
                .header("X-Access-Token", &auth.access_token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;
        let data = decode_body(&raw);

        if status.is_success() {
            Ok(ApiResult {
                status: status.as_u16(),
                data,
            })
        } else {
            Err(PlatformError::Api {
                status: status.as_u16(),
                data,
            })
        }
    }
}

/// Decoded JSON body, the raw text when it is not JSON, or null for an
/// empty body.
fn decode_body(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_body_handles_json_text_and_empty() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("{\"a\":1}")["a"], 1);
        assert_eq!(decode_body("oops"), Value::String("oops".to_owned()));
    }

    #[test]
    fn base_url_gets_a_trailing_slash() {
        let client = PlatformClient::new("https://api.e-com.plus/v1", 30, None, None)
            .expect("client construction should not fail");
        let url = client.base_url.join("orders.json?limit=1").expect("join");
        assert_eq!(url.as_str(), "https://api.e-com.plus/v1/orders.json?limit=1");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            PlatformClient::new("not a url", 30, None, None),
            Err(PlatformError::Url { .. })
        ));
    }
}
