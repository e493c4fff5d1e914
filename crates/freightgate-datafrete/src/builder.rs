//! Assembles the outbound quote payload from cart items and the resolved
//! origin.

use freightgate_core::cart::{CartItem, Measure};
use freightgate_core::origin::ResolvedOrigin;
use freightgate_core::units::{to_centimeters, to_kilograms};

use crate::types::{CompanyInfo, QuoteItem, QuoteRequest, PLATFORM_TAG};

/// Builds the Datafrete quote request for `items` shipping from `origin`
/// to `destination_zip` (digit-only).
#[must_use]
pub fn build_quote_request(
    items: &[CartItem],
    origin: &ResolvedOrigin,
    destination_zip: &str,
) -> QuoteRequest {
    QuoteRequest {
        token: origin.token.clone(),
        cep_origem: origin.zip.clone(),
        cep_destino: destination_zip.to_owned(),
        company: CompanyInfo {
            doc_empresa: origin.doc_number.clone(),
            plataforma: PLATFORM_TAG,
        },
        produtos: items.iter().map(quote_item).collect(),
    }
}

fn quote_item(item: &CartItem) -> QuoteItem {
    let dimensions = item.dimensions.as_ref();
    let side = |measure: Option<&Measure>| {
        measure.map_or(0.0, |m| to_centimeters(m.value, m.unit.as_deref()))
    };
    QuoteItem {
        sku: item.sku.clone(),
        descricao: item.name.clone(),
        altura: side(dimensions.and_then(|d| d.height.as_ref())),
        largura: side(dimensions.and_then(|d| d.width.as_ref())),
        comprimento: side(dimensions.and_then(|d| d.length.as_ref())),
        peso: to_kilograms(item.weight.as_ref()),
        preco: item.unit_price(),
        qtd: item.quantity,
        volume: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn origin() -> ResolvedOrigin {
        ResolvedOrigin {
            zip: "13566583".to_owned(),
            doc_number: "12345678000190".to_owned(),
            token: "quote-token".to_owned(),
            warehouse_code: None,
        }
    }

    #[test]
    fn maps_items_into_provider_units() {
        let items: Vec<CartItem> = serde_json::from_value(json!([{
            "sku": "A1",
            "name": "Bottle",
            "price": 24.9,
            "quantity": 2,
            "weight": { "value": 500.0, "unit": "g" },
            "dimensions": {
                "height": { "value": 0.2, "unit": "m" },
                "width": { "value": 100.0, "unit": "mm" }
            }
        }]))
        .expect("items");

        let request = build_quote_request(&items, &origin(), "01310000");
        let payload = serde_json::to_value(&request).expect("serialize");

        assert_eq!(payload["token"], json!("quote-token"));
        assert_eq!(payload["cepOrigem"], json!("13566583"));
        assert_eq!(payload["cepDestino"], json!("01310000"));
        assert_eq!(payload["infComp"]["doc_empresa"], json!("12345678000190"));
        assert_eq!(payload["infComp"]["plataforma"], json!("ECOM"));

        let produto = &payload["produtos"][0];
        assert_eq!(produto["sku"], json!("A1"));
        assert_eq!(produto["descricao"], json!("Bottle"));
        assert_eq!(produto["peso"], json!(0.5));
        assert_eq!(produto["altura"], json!(20.0));
        assert_eq!(produto["largura"], json!(10.0));
        assert_eq!(produto["comprimento"], json!(0.0), "missing side quotes as zero");
        assert_eq!(produto["preco"], json!(24.9));
        assert_eq!(produto["qtd"], json!(2));
        assert_eq!(produto["volume"], json!(0));
    }

    #[test]
    fn bare_item_quotes_with_zeroed_measures() {
        let items: Vec<CartItem> =
            serde_json::from_value(json!([{ "sku": "A2", "quantity": 1 }])).expect("items");
        let request = build_quote_request(&items, &origin(), "01310000");
        let produto = &request.produtos[0];
        assert_eq!(produto.peso, 0.0);
        assert_eq!(produto.altura, 0.0);
        assert_eq!(produto.largura, 0.0);
        assert_eq!(produto.comprimento, 0.0);
    }
}
