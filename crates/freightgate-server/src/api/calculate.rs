//! The calculate-shipping module endpoint.
//!
//! Control flow: merge merchant config → credential check → free-shipping
//! rule evaluation → (preview short-circuit) → origin resolution → cart
//! check → provider quote → response normalization. Every failure path
//! answers with a stable module error code.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use freightgate_core::cart::CalculateParams;
use freightgate_core::merchant::{ApplicationConfig, MerchantConfig};
use freightgate_core::origin::resolve_origin;
use freightgate_core::response::CalculateResponse;
use freightgate_core::zip::{normalize_zip, resolve_free_shipping};
use freightgate_datafrete::{build_quote_request, normalize_quote, DatafreteError, QuoteContext};

use super::{AppState, ModuleError};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct CalculateRequest {
    #[serde(default)]
    params: CalculateParams,
    #[serde(default)]
    application: ApplicationConfig,
}

pub(super) async fn handle(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ModuleError> {
    let config = MerchantConfig::merged(&request.application).map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "malformed merchant configuration");
        ModuleError::new("CALCULATE_ERR", format!("malformed app configuration: {e}"))
    })?;

    if !config.has_credentials() {
        return Err(ModuleError::new(
            "CALCULATE_AUTH_ERR",
            "Token or document unset on app hidden data (merchant must configure the app)",
        ));
    }

    let params = &request.params;
    let destination_zip = params
        .to
        .as_ref()
        .map(|to| normalize_zip(&to.zip))
        .unwrap_or_default();

    let initial = config
        .free_shipping_from_value
        .filter(|value| !value.is_sign_negative());
    let free_shipping_from_value =
        resolve_free_shipping(initial, &config.free_shipping_rules, &destination_zip);

    let Some(destination) = params.to.as_ref() else {
        // free-shipping preview: no address to quote against
        return Ok(Json(CalculateResponse {
            shipping_services: Vec::new(),
            free_shipping_from_value,
        }));
    };

    let Some(origin) = resolve_origin(params, &config) else {
        return Err(ModuleError::new(
            "CALCULATE_SKIP",
            "Zip code is unset on app hidden data (merchant must configure the app)",
        ));
    };

    let Some(items) = params.items.as_deref().filter(|items| !items.is_empty()) else {
        return Err(ModuleError::new(
            "CALCULATE_EMPTY_CART",
            "Cannot calculate shipping without cart items",
        ));
    };

    let payload = build_quote_request(items, &origin, &destination_zip);
    let quoted = state
        .datafrete
        .quote(&payload, config.datafrete_endpoint.as_deref())
        .await
        .and_then(|body| {
            let ctx = QuoteContext {
                origin: &origin,
                destination,
                posting_deadline: config.posting_deadline.as_ref(),
            };
            normalize_quote(&body, &ctx)
        });

    match quoted {
        Ok(shipping_services) => Ok(Json(CalculateResponse {
            shipping_services,
            free_shipping_from_value,
        })),
        Err(err) => Err(map_quote_error(&req_id.0, &err)),
    }
}

/// Classifies a quote failure into the module's stable error codes.
fn map_quote_error(request_id: &str, err: &DatafreteError) -> ModuleError {
    tracing::warn!(request_id, error = %err, "Datafrete quote failed");
    match err {
        DatafreteError::InvalidBody { raw } => {
            ModuleError::new("CALCULATE_INVALID_RES", raw.clone())
        }
        DatafreteError::Provider {
            status,
            body,
            message,
        } => {
            // a structured provider error carries its message in `data`
            if let Some(data) = body
                .as_ref()
                .and_then(|body| body.get("data"))
                .filter(|data| !data.is_null())
            {
                return ModuleError::new("CALCULATE_FAILED", stringify(data));
            }
            let message = match status {
                Some(status) => format!("{message} ({status})"),
                None => message.clone(),
            };
            ModuleError::new("CALCULATE_ERR", message)
        }
        DatafreteError::Http(_) | DatafreteError::NonNumeric { .. } => {
            ModuleError::new("CALCULATE_ERR", err.to_string())
        }
    }
}

fn stringify(data: &Value) -> String {
    match data {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    }
}
