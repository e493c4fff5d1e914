//! Postal-code normalization and free-shipping rule evaluation.
//!
//! Zip ranges are compared as digit-only strings, lexicographically.
//! Merchant rule ranges were configured against that ordering, so it must
//! not be switched to numeric comparison.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Strips every non-digit character from a postal code.
#[must_use]
pub fn normalize_zip(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// An inclusive postal-code range; missing bounds are unbounded.
#[derive(Debug, Clone, Deserialize)]
pub struct ZipRange {
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

impl ZipRange {
    /// Lexicographic containment check on digit-only codes.
    #[must_use]
    pub fn contains(&self, zip: &str) -> bool {
        self.min.as_deref().map_or(true, |min| zip >= min)
            && self.max.as_deref().map_or(true, |max| zip <= max)
    }
}

/// A merchant-configured free-shipping rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreeShippingRule {
    #[serde(default)]
    pub zip_range: Option<ZipRange>,
    /// Minimum order amount; absent or zero means unconditional free
    /// shipping inside the range.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub min_amount: Option<Decimal>,
}

/// Whether a rule constrained by `range` applies to `destination`.
///
/// Rules without a range always apply. Range-bound rules never apply when
/// no destination zip is known (free-shipping preview mode).
#[must_use]
pub fn range_applies(range: Option<&ZipRange>, destination: &str) -> bool {
    match range {
        None => true,
        Some(_) if destination.is_empty() => false,
        Some(range) => range.contains(destination),
    }
}

/// Resolves the free-shipping threshold for `destination`.
///
/// Scans rules in configured order starting from `initial` (the store-wide
/// threshold, if any). An applicable rule without a minimum amount is
/// unconditional free shipping: the threshold drops to zero and scanning
/// stops. Otherwise the lowest applicable minimum wins.
#[must_use]
pub fn resolve_free_shipping(
    initial: Option<Decimal>,
    rules: &[FreeShippingRule],
    destination: &str,
) -> Option<Decimal> {
    let mut threshold = initial;
    for rule in rules {
        if !range_applies(rule.zip_range.as_ref(), destination) {
            continue;
        }
        match rule.min_amount {
            None => return Some(Decimal::ZERO),
            Some(min) if min.is_zero() => return Some(Decimal::ZERO),
            Some(min) => {
                if threshold.map_or(true, |current| current > min) {
                    threshold = Some(min);
                }
            }
        }
    }
    threshold
}
