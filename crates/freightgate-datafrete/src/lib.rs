//! Client for the Datafrete freight-quote API.
//!
//! Wraps `reqwest` with Datafrete-specific error handling and turns the
//! provider's quote payloads into the platform's shipping-option schema.
//! The quote endpoint answers with a JSON object *or* a JSON-encoded
//! string, signals success through a numeric `codigo_retorno` field, and
//! mixes strings and numbers freely inside offers; [`client`] and
//! [`normalize`] absorb all of that.

pub mod builder;
mod client;
mod error;
pub mod normalize;
pub mod types;

pub use builder::build_quote_request;
pub use client::{DatafreteClient, DEFAULT_ENDPOINT};
pub use error::DatafreteError;
pub use normalize::{normalize_quote, QuoteContext};
