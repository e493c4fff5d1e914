//! Relays Datafrete fulfillment webhooks into the platform's order API.
//!
//! Thin pass-through: look the order up by number, short-circuit when the
//! fulfillment status is unchanged, patch the matching shipping line when
//! invoices or tracking codes arrived, then post the fulfillment event.
//! Upstream Store API errors are relayed with their own status and body.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use freightgate_core::response::PROVIDER_FLAG;
use freightgate_platform::types::OrderPage;
use freightgate_platform::{Method, PlatformClient, PlatformError};

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct WebhookBody {
    #[serde(default)]
    store_id: Option<u64>,
    #[serde(default)]
    order_update: Option<OrderUpdate>,
}

#[derive(Debug, Deserialize)]
struct OrderUpdate {
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    fulfillment: Option<FulfillmentUpdate>,
    #[serde(default)]
    invoices: Option<Value>,
    #[serde(default)]
    tracking_codes: Option<Value>,
}

/// Fulfillment event passed through to the order API; unknown fields ride
/// along via the flattened map.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FulfillmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shipping_line_id: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

pub(super) async fn handle(State(state): State<AppState>, Json(body): Json<WebhookBody>) -> Response {
    let (Some(store_id), Some(update)) = (body.store_id, body.order_update) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let (Some(number), Some(fulfillment)) = (update.number, update.fulfillment.as_ref()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Some(status) = fulfillment.status.as_deref().filter(|s| !s.is_empty()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    tracing::info!(store_id, order_number = number, status, "fulfillment webhook received");

    match relay(&state.platform, store_id, number, &update, fulfillment, status).await {
        Ok(response) => response,
        Err(PlatformError::Api { status, data }) => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (code, Json(data)).into_response()
        }
        Err(err) => {
            tracing::error!(store_id, order_number = number, error = %err, "webhook relay failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn relay(
    platform: &PlatformClient,
    store_id: u64,
    number: u64,
    update: &OrderUpdate,
    fulfillment: &FulfillmentUpdate,
    status: &str,
) -> Result<Response, PlatformError> {
    let auth = platform.get_auth(store_id).await?;

    let lookup = format!(
        "orders.json?number={number}&fields=_id,fulfillment_status,shipping_lines&limit=1"
    );
    let found = platform
        .api_request(store_id, &lookup, Method::GET, None, &auth)
        .await?;
    let page: OrderPage = serde_json::from_value(found.data)
        .map_err(|e| PlatformError::Unexpected(format!("order lookup: {e}")))?;
    let Some(order) = page.result.into_iter().next() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    if order
        .fulfillment_status
        .as_ref()
        .and_then(|current| current.current.as_deref())
        == Some(status)
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    if update.invoices.is_some() || update.tracking_codes.is_some() {
        let shipping_line_id = fulfillment.shipping_line_id.clone().or_else(|| {
            order
                .shipping_lines
                .iter()
                .find(|line| line.flags.iter().any(|flag| flag == PROVIDER_FLAG))
                .map(|line| line.id.clone())
        });

        let mut patch = Map::new();
        if let Some(invoices) = &update.invoices {
            patch.insert("invoices".to_owned(), invoices.clone());
        }
        if let Some(tracking) = &update.tracking_codes {
            patch.insert("trackingCodes".to_owned(), tracking.clone());
        }

        let path = format!(
            "orders/{}/shipping_lines/{}.json",
            order.id,
            shipping_line_id.as_deref().unwrap_or("0")
        );
        platform
            .api_request(store_id, &path, Method::PATCH, Some(&Value::Object(patch)), &auth)
            .await?;
        tracing::info!(order_id = %order.id, "shipping line updated");
    }

    let event = serde_json::to_value(fulfillment)
        .map_err(|e| PlatformError::Unexpected(format!("fulfillment body: {e}")))?;
    let posted = platform
        .api_request(
            store_id,
            &format!("orders/{}/fulfillments.json", order.id),
            Method::POST,
            Some(&event),
            &auth,
        )
        .await?;

    Ok(StatusCode::from_u16(posted.status)
        .unwrap_or(StatusCode::OK)
        .into_response())
}
