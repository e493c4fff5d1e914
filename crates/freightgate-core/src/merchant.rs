//! Merchant-facing configuration: the merged view of the application's
//! visible and hidden data layers.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::response::PostingDeadline;
use crate::zip::{FreeShippingRule, ZipRange};

/// The two configuration layers the platform sends with every module
/// request. Merchants edit `data`; `hidden_data` holds credentials and
/// anything else not exposed in the storefront admin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub hidden_data: Option<Value>,
}

/// Merged merchant settings. Hidden-layer fields win over visible ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MerchantConfig {
    /// Company document number used to authenticate with Datafrete.
    #[serde(default)]
    pub datafrete_doc: Option<String>,
    /// Datafrete API token.
    #[serde(default)]
    pub datafrete_token: Option<String>,
    /// Overrides the default Datafrete quote endpoint.
    #[serde(default)]
    pub datafrete_endpoint: Option<String>,
    /// Default origin postal code when no warehouse matches.
    #[serde(default)]
    pub zip: Option<String>,
    /// Store-wide free-shipping threshold, before rule evaluation.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub free_shipping_from_value: Option<Decimal>,
    #[serde(default)]
    pub free_shipping_rules: Vec<FreeShippingRule>,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
    /// Overrides the 3-day posting deadline on quoted services.
    #[serde(default)]
    pub posting_deadline: Option<PostingDeadline>,
}

impl MerchantConfig {
    /// Builds the merged view of `data` + `hidden_data`.
    ///
    /// Shallow merge: hidden keys replace visible ones wholesale. Layers
    /// that are not JSON objects contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when a merged field does not
    /// match its documented type; callers reject the request at the
    /// boundary instead of running rules over garbage.
    pub fn merged(application: &ApplicationConfig) -> Result<Self, serde_json::Error> {
        let mut merged = serde_json::Map::new();
        for layer in [&application.data, &application.hidden_data] {
            if let Some(Value::Object(map)) = layer {
                for (key, value) in map {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        serde_json::from_value(Value::Object(merged))
    }

    /// Whether both Datafrete credentials are configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        let set = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
        set(&self.datafrete_doc) && set(&self.datafrete_token)
    }
}

/// A fulfillment location that can override the shipment origin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Warehouse {
    /// Identifier matched against item inventory maps. A warehouse
    /// without a code cannot be selected.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    /// Restricts the warehouse to destinations inside the range.
    #[serde(default)]
    pub zip_range: Option<ZipRange>,
    /// Credential overrides; unset fields fall back to the top-level ones.
    #[serde(default)]
    pub doc_number: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hidden_data_wins_over_data() {
        let application = ApplicationConfig {
            data: Some(json!({ "zip": "01310-000", "datafrete_doc": "visible" })),
            hidden_data: Some(json!({ "datafrete_doc": "12345678000190", "datafrete_token": "tok" })),
        };
        let config = MerchantConfig::merged(&application).expect("merge");
        assert_eq!(config.zip.as_deref(), Some("01310-000"));
        assert_eq!(config.datafrete_doc.as_deref(), Some("12345678000190"));
        assert_eq!(config.datafrete_token.as_deref(), Some("tok"));
        assert!(config.has_credentials());
    }

    #[test]
    fn non_object_layers_contribute_nothing() {
        let application = ApplicationConfig {
            data: Some(json!("not an object")),
            hidden_data: None,
        };
        let config = MerchantConfig::merged(&application).expect("merge");
        assert!(config.datafrete_doc.is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let application = ApplicationConfig {
            data: Some(json!({ "some_future_flag": true, "zip": "13566-583" })),
            hidden_data: None,
        };
        let config = MerchantConfig::merged(&application).expect("merge");
        assert_eq!(config.zip.as_deref(), Some("13566-583"));
    }

    #[test]
    fn wrong_typed_field_is_a_boundary_error() {
        let application = ApplicationConfig {
            data: Some(json!({ "warehouses": "not a list" })),
            hidden_data: None,
        };
        assert!(MerchantConfig::merged(&application).is_err());
    }

    #[test]
    fn partial_posting_deadline_keeps_default_days() {
        let application = ApplicationConfig {
            data: Some(json!({ "posting_deadline": { "working_days": true } })),
            hidden_data: None,
        };
        let config = MerchantConfig::merged(&application).expect("merge");
        let deadline = config.posting_deadline.expect("posting deadline");
        assert_eq!(deadline.days, 3);
        assert_eq!(deadline.working_days, Some(true));
    }
}
