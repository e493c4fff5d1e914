//! Calculate-request parameters: cart items and shipment endpoints.
//!
//! These model the module framework's `params` object. Addresses are
//! reduced to the postal code, the only field freight quoting needs.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Module `params` for a shipping calculation request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateParams {
    /// Destination address; absent for free-shipping previews.
    #[serde(default)]
    pub to: Option<AddressRef>,
    /// Explicit origin override; wins over warehouses and the default zip.
    #[serde(default)]
    pub from: Option<AddressRef>,
    #[serde(default)]
    pub items: Option<Vec<CartItem>>,
}

/// An address reduced to its postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRef {
    pub zip: String,
}

/// A single cart line as sent by the platform's checkout module.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Promotional price; takes precedence over `price` when present.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub final_price: Option<Decimal>,
    pub quantity: u32,
    #[serde(default)]
    pub weight: Option<Measure>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Available quantity per warehouse code, when the store tracks
    /// multi-warehouse inventory.
    #[serde(default)]
    pub inventory: Option<HashMap<String, f64>>,
}

impl CartItem {
    /// Unit price after item-level pricing rules.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.final_price.or(self.price).unwrap_or(Decimal::ZERO)
    }
}

/// A measured value with its declared unit (`kg`/`g`/`mg`, `cm`/`m`/`mm`).
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Package dimensions; absent sides quote as zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub height: Option<Measure>,
    #[serde(default)]
    pub width: Option<Measure>,
    #[serde(default)]
    pub length: Option<Measure>,
}
