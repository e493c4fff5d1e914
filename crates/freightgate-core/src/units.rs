//! Conversion of cart weights and dimensions into the units Datafrete
//! quotes in: kilograms and centimeters.

use crate::cart::Measure;

/// Converts a cart weight into kilograms.
///
/// Grams and milligrams are scaled down; any other (or missing) unit is
/// taken to already be kilograms. A missing weight yields 0.
#[must_use]
pub fn to_kilograms(weight: Option<&Measure>) -> f64 {
    let Some(weight) = weight else { return 0.0 };
    if weight.value == 0.0 {
        return 0.0;
    }
    match weight.unit.as_deref() {
        Some("g") => weight.value / 1_000.0,
        Some("mg") => weight.value / 1_000_000.0,
        _ => weight.value,
    }
}

/// Converts a single dimension side into centimeters.
///
/// Meters are scaled up, millimeters down; any other (or missing) unit is
/// taken to already be centimeters.
#[must_use]
pub fn to_centimeters(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some("m") => value * 100.0,
        Some("mm") => value / 10.0,
        _ => value,
    }
}
