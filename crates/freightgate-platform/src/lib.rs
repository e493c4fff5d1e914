//! Minimal client for the platform's Store API.
//!
//! The webhook relay only needs two operations: authenticate on behalf of
//! a store and issue raw resource requests (`orders.json` lookups,
//! shipping-line patches, fulfillment posts). Upstream errors keep their
//! `{status, data}` pair so callers can relay them verbatim.

mod client;
mod error;
pub mod types;

pub use client::{ApiResult, PlatformClient};
pub use error::PlatformError;

pub use reqwest::Method;
