//! Store API types used by the webhook relay.

use serde::Deserialize;

/// Credentials returned by `POST /_authenticate`.
#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    pub my_id: String,
    pub access_token: String,
}

/// Result page of an order query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPage {
    #[serde(default)]
    pub result: Vec<OrderSummary>,
}

/// The slice of an order the relay needs.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub fulfillment_status: Option<FulfillmentStatus>,
    #[serde(default)]
    pub shipping_lines: Vec<OrderShippingLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FulfillmentStatus {
    #[serde(default)]
    pub current: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderShippingLine {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub flags: Vec<String>,
}
