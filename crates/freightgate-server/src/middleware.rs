//! Request-scoped middleware: request IDs and the webhook operator gate.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Shared secret Datafrete presents on webhook calls.
#[derive(Debug, Clone)]
pub struct OperatorAuth {
    token: Option<Arc<String>>,
    pub enabled: bool,
}

impl OperatorAuth {
    /// Builds the webhook gate from configuration.
    ///
    /// In development a missing token disables the gate for local
    /// iteration. In non-development envs a missing token fails startup.
    pub fn from_config(token: Option<&str>, is_development: bool) -> anyhow::Result<Self> {
        match token {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                token: Some(Arc::new(token.to_owned())),
                enabled: true,
            }),
            _ if is_development => {
                tracing::warn!(
                    "DATAFRETE_OPERATOR_TOKEN not set; webhook auth disabled in development environment"
                );
                Ok(Self {
                    token: None,
                    enabled: false,
                })
            }
            _ => anyhow::bail!(
                "DATAFRETE_OPERATOR_TOKEN is required outside development; provide the shared webhook secret"
            ),
        }
    }

    fn allows(&self, presented: Option<&str>) -> bool {
        if !self.enabled {
            return true;
        }
        let Some(expected) = &self.token else {
            return false;
        };
        presented.is_some_and(|p| bool::from(p.as_bytes().ct_eq(expected.as_bytes())))
    }
}

/// Middleware rejecting webhook calls without the operator token.
pub async fn require_operator_token(
    State(auth): State<OperatorAuth>,
    req: Request,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get("x-operator-token")
        .and_then(|v| v.to_str().ok());

    if auth.allows(presented) {
        next.run(req).await
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_gate_requires_the_exact_token() {
        let auth = OperatorAuth::from_config(Some("secret"), false).expect("auth");
        assert!(auth.enabled);
        assert!(auth.allows(Some("secret")));
        assert!(!auth.allows(Some("Secret")));
        assert!(!auth.allows(Some("secret ")));
        assert!(!auth.allows(None));
    }

    #[test]
    fn missing_token_disables_the_gate_in_development() {
        let auth = OperatorAuth::from_config(None, true).expect("dev should allow missing token");
        assert!(!auth.enabled);
        assert!(auth.allows(None));
    }

    #[test]
    fn missing_token_fails_startup_outside_development() {
        assert!(OperatorAuth::from_config(None, false).is_err());
        assert!(OperatorAuth::from_config(Some("  "), false).is_err());
    }
}
