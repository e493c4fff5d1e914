//! Shipment origin selection: explicit request origin, configured
//! warehouses, or the merchant's default postal code.

use crate::cart::CalculateParams;
use crate::merchant::MerchantConfig;
use crate::zip::{normalize_zip, range_applies};

/// The origin and credentials a quote request should be built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrigin {
    /// Digit-only origin postal code.
    pub zip: String,
    pub doc_number: String,
    pub token: String,
    /// Set when a warehouse was selected; carried on the shipping line so
    /// fulfillment knows where the shipment posts from.
    pub warehouse_code: Option<String>,
}

/// Picks the origin zip and credentials for a calculation request.
///
/// An explicit `params.from` wins outright and keeps the top-level
/// credentials. Otherwise warehouses are scanned in configured order and
/// the last applicable one wins; each may override the document number and
/// token independently. With no applicable warehouse the merchant's default
/// zip applies. Returns `None` when nothing yields a usable (non-empty,
/// digit-only) postal code.
#[must_use]
pub fn resolve_origin(params: &CalculateParams, config: &MerchantConfig) -> Option<ResolvedOrigin> {
    let doc_number = config.datafrete_doc.clone().unwrap_or_default();
    let token = config.datafrete_token.clone().unwrap_or_default();

    let origin = if let Some(from) = &params.from {
        ResolvedOrigin {
            zip: from.zip.clone(),
            doc_number,
            token,
            warehouse_code: None,
        }
    } else {
        let destination = params
            .to
            .as_ref()
            .map(|to| normalize_zip(&to.zip))
            .unwrap_or_default();

        let mut selected = None;
        for warehouse in &config.warehouses {
            let Some(code) = warehouse.code.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            let Some(zip) = warehouse.zip.as_deref().filter(|z| !z.is_empty()) else {
                continue;
            };
            if !range_applies(warehouse.zip_range.as_ref(), &destination) {
                continue;
            }
            if !stock_covers_cart(params, code) {
                continue;
            }
            selected = Some(ResolvedOrigin {
                zip: zip.to_owned(),
                doc_number: warehouse
                    .doc_number
                    .clone()
                    .unwrap_or_else(|| doc_number.clone()),
                token: warehouse.token.clone().unwrap_or_else(|| token.clone()),
                warehouse_code: Some(code.to_owned()),
            });
        }

        selected.or_else(|| {
            config.zip.as_deref().map(|zip| ResolvedOrigin {
                zip: zip.to_owned(),
                doc_number,
                token,
                warehouse_code: None,
            })
        })?
    };

    let zip = normalize_zip(&origin.zip);
    if zip.is_empty() {
        return None;
    }
    Some(ResolvedOrigin { zip, ..origin })
}

/// Whether every cart item with a populated inventory map lists enough
/// stock at `code`. Items without inventory data never block a warehouse.
fn stock_covers_cart(params: &CalculateParams, code: &str) -> bool {
    let Some(items) = &params.items else {
        return true;
    };
    items.iter().all(|item| match &item.inventory {
        Some(map) if !map.is_empty() => {
            map.get(code).copied().unwrap_or(0.0) >= f64::from(item.quantity)
        }
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::AddressRef;
    use crate::merchant::Warehouse;
    use crate::zip::ZipRange;
    use serde_json::json;

    fn config_with(warehouses: Vec<Warehouse>, default_zip: Option<&str>) -> MerchantConfig {
        MerchantConfig {
            datafrete_doc: Some("12345678000190".to_owned()),
            datafrete_token: Some("top-token".to_owned()),
            zip: default_zip.map(str::to_owned),
            warehouses,
            ..MerchantConfig::default()
        }
    }

    fn warehouse(code: &str, zip: &str) -> Warehouse {
        Warehouse {
            code: Some(code.to_owned()),
            zip: Some(zip.to_owned()),
            ..Warehouse::default()
        }
    }

    fn params_to(zip: &str) -> CalculateParams {
        CalculateParams {
            to: Some(AddressRef {
                zip: zip.to_owned(),
            }),
            ..CalculateParams::default()
        }
    }

    #[test]
    fn explicit_from_wins_and_keeps_top_level_credentials() {
        let mut params = params_to("01310-000");
        params.from = Some(AddressRef {
            zip: "13.566-583".to_owned(),
        });
        let config = config_with(vec![warehouse("SP", "04547-000")], Some("99999-000"));

        let origin = resolve_origin(&params, &config).expect("origin");
        assert_eq!(origin.zip, "13566583");
        assert_eq!(origin.doc_number, "12345678000190");
        assert_eq!(origin.token, "top-token");
        assert!(origin.warehouse_code.is_none());
    }

    #[test]
    fn last_applicable_warehouse_wins() {
        let params = params_to("01310-000");
        let config = config_with(
            vec![warehouse("SP", "04547-000"), warehouse("RJ", "20040-020")],
            None,
        );

        let origin = resolve_origin(&params, &config).expect("origin");
        assert_eq!(origin.warehouse_code.as_deref(), Some("RJ"));
        assert_eq!(origin.zip, "20040020");
    }

    #[test]
    fn warehouse_without_code_or_zip_is_skipped() {
        let params = params_to("01310-000");
        let nameless = warehouse("", "04547-000");
        let zipless = warehouse("MG", "");
        let config = config_with(vec![nameless, zipless], Some("13566-583"));

        let origin = resolve_origin(&params, &config).expect("origin");
        assert!(origin.warehouse_code.is_none());
        assert_eq!(origin.zip, "13566583");
    }

    #[test]
    fn warehouse_range_is_checked_against_destination() {
        let params = params_to("30130-010");
        let mut southeast = warehouse("SP", "04547-000");
        southeast.zip_range = Some(ZipRange {
            min: Some("01000000".to_owned()),
            max: Some("19999999".to_owned()),
        });
        let config = config_with(vec![southeast], Some("13566-583"));

        let origin = resolve_origin(&params, &config).expect("origin");
        assert!(origin.warehouse_code.is_none(), "out-of-range warehouse must not win");
        assert_eq!(origin.zip, "13566583");
    }

    #[test]
    fn insufficient_inventory_rejects_a_warehouse() {
        let mut params = params_to("01310-000");
        params.items = Some(
            serde_json::from_value(json!([
                { "sku": "A1", "quantity": 3, "inventory": { "SP": 1.0, "RJ": 5.0 } }
            ]))
            .expect("items"),
        );
        let config = config_with(
            vec![warehouse("RJ", "20040-020"), warehouse("SP", "04547-000")],
            None,
        );

        let origin = resolve_origin(&params, &config).expect("origin");
        assert_eq!(origin.warehouse_code.as_deref(), Some("RJ"));
    }

    #[test]
    fn empty_inventory_map_never_blocks() {
        let mut params = params_to("01310-000");
        params.items = Some(
            serde_json::from_value(json!([{ "sku": "A1", "quantity": 3, "inventory": {} }]))
                .expect("items"),
        );
        let config = config_with(vec![warehouse("SP", "04547-000")], None);

        let origin = resolve_origin(&params, &config).expect("origin");
        assert_eq!(origin.warehouse_code.as_deref(), Some("SP"));
    }

    #[test]
    fn warehouse_credentials_override_per_field() {
        let params = params_to("01310-000");
        let mut sp = warehouse("SP", "04547-000");
        sp.token = Some("warehouse-token".to_owned());
        let config = config_with(vec![sp], None);

        let origin = resolve_origin(&params, &config).expect("origin");
        assert_eq!(origin.token, "warehouse-token");
        assert_eq!(origin.doc_number, "12345678000190", "doc falls back to top level");
    }

    #[test]
    fn falls_back_to_default_zip_then_none() {
        let params = params_to("01310-000");
        let configured = config_with(vec![], Some("13566-583"));
        assert_eq!(
            resolve_origin(&params, &configured).map(|o| o.zip),
            Some("13566583".to_owned())
        );

        let unconfigured = config_with(vec![], None);
        assert!(resolve_origin(&params, &unconfigured).is_none());

        let garbage = config_with(vec![], Some("no digits"));
        assert!(resolve_origin(&params, &garbage).is_none());
    }
}
