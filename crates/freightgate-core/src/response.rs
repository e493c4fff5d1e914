//! The platform's calculate-shipping module response schema.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::AddressRef;

/// Flag present on every shipping line quoted by this integration; the
/// webhook relay uses it to find the matching line on an order.
pub const PROVIDER_FLAG: &str = "datafrete-ws";

/// Module response body: quoted services plus the free-shipping threshold.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalculateResponse {
    pub shipping_services: Vec<ShippingOption>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub free_shipping_from_value: Option<Decimal>,
}

/// One priced shipping offer in the platform's schema.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingOption {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Digit-only carrier document, truncated to the platform's 19-char cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_doc_number: Option<String>,
    pub service_name: String,
    pub service_code: String,
    pub shipping_line: ShippingLine,
}

/// The order-level shipping record created when this option is chosen.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingLine {
    pub from: AddressRef,
    pub to: AddressRef,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub delivery_time: DeliveryTime,
    pub posting_deadline: PostingDeadline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_code: Option<String>,
    pub flags: Vec<String>,
}

/// Delivery estimate, always counted in working days.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryTime {
    pub days: u32,
    pub working_days: bool,
}

/// Days the merchant has to post the shipment. Defaults to 3; merchants
/// can override any field from the app configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingDeadline {
    #[serde(default = "default_posting_days")]
    pub days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_days: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_approval: Option<bool>,
}

fn default_posting_days() -> u32 {
    3
}

impl Default for PostingDeadline {
    fn default() -> Self {
        Self {
            days: default_posting_days(),
            working_days: None,
            after_approval: None,
        }
    }
}
