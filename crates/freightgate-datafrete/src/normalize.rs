//! Normalization of Datafrete quote payloads into the platform's
//! shipping-option schema.

use rust_decimal::Decimal;
use serde_json::Value;

use freightgate_core::cart::AddressRef;
use freightgate_core::origin::ResolvedOrigin;
use freightgate_core::response::{
    DeliveryTime, PostingDeadline, ShippingLine, ShippingOption, PROVIDER_FLAG,
};
use freightgate_core::zip::normalize_zip;

use crate::error::DatafreteError;
use crate::types::RawOffer;

/// Flags are capped by the platform schema.
const FLAG_MAX_LEN: usize = 20;
/// Carrier document numbers are capped by the platform schema.
const CARRIER_DOC_MAX_LEN: usize = 19;

/// Everything offer mapping needs besides the offer itself.
#[derive(Debug, Clone)]
pub struct QuoteContext<'a> {
    pub origin: &'a ResolvedOrigin,
    pub destination: &'a AddressRef,
    /// Merchant override for the 3-day posting deadline.
    pub posting_deadline: Option<&'a PostingDeadline>,
}

/// Turns a decoded quote body into shipping options.
///
/// A body counts as success only when its numeric `codigo_retorno` equals
/// 1 and `data` is a list; anything else is a [`DatafreteError::Provider`]
/// carrying the body for classification.
///
/// # Errors
///
/// - [`DatafreteError::Provider`] on a non-success body shape.
/// - [`DatafreteError::NonNumeric`] when an offer's price or lead time
///   does not parse.
pub fn normalize_quote(
    body: &Value,
    ctx: &QuoteContext<'_>,
) -> Result<Vec<ShippingOption>, DatafreteError> {
    let return_code = body.get("codigo_retorno").and_then(coerce_i64);
    let offers = body.get("data").and_then(Value::as_array);
    let (Some(1), Some(offers)) = (return_code, offers) else {
        return Err(DatafreteError::Provider {
            status: None,
            body: Some(body.clone()),
            message: "invalid Datafrete calculate response".to_owned(),
        });
    };
    offers.iter().map(|offer| map_offer(offer, ctx)).collect()
}

fn map_offer(raw: &Value, ctx: &QuoteContext<'_>) -> Result<ShippingOption, DatafreteError> {
    let offer: RawOffer =
        serde_json::from_value(raw.clone()).map_err(|e| DatafreteError::Provider {
            status: None,
            body: Some(raw.clone()),
            message: format!("malformed Datafrete offer: {e}"),
        })?;

    let service_code = scalar_string(&offer.cod_tabela).unwrap_or_default();
    let carrier = scalar_string(&offer.nome_transportador);
    let description = scalar_string(&offer.descricao);
    let price = offer_price(&offer)?;
    let days = offer_days(&offer)?;

    let service_name = format!(
        "{} (Datafrete)",
        description.as_deref().unwrap_or(&service_code)
    );
    let label = carrier
        .clone()
        .or_else(|| description.clone())
        .unwrap_or_default();
    let carrier_doc_number = match &offer.cnpj_transportador {
        Value::String(doc) => Some(truncate(&normalize_zip(doc), CARRIER_DOC_MAX_LEN)),
        _ => None,
    };
    let flags = vec![
        PROVIDER_FLAG.to_owned(),
        truncate(&format!("datafrete-{service_code}"), FLAG_MAX_LEN),
    ];

    Ok(ShippingOption {
        label,
        carrier,
        carrier_doc_number,
        service_name,
        service_code,
        shipping_line: ShippingLine {
            from: AddressRef {
                zip: ctx.origin.zip.clone(),
            },
            to: ctx.destination.clone(),
            price,
            total_price: price,
            discount: Decimal::ZERO,
            delivery_time: DeliveryTime {
                days,
                working_days: true,
            },
            posting_deadline: ctx.posting_deadline.cloned().unwrap_or_default(),
            warehouse_code: ctx.origin.warehouse_code.clone(),
            flags,
        },
    })
}

/// Display price when it parses to a non-negative amount, else the
/// standard price. Neither parsing is a normalization failure, not a NaN.
fn offer_price(offer: &RawOffer) -> Result<Decimal, DatafreteError> {
    let display = parse_decimal(&offer.valor_frete_exibicao).filter(|p| !p.is_sign_negative());
    if let Some(price) = display {
        return Ok(price);
    }
    parse_decimal(&offer.valor_frete).ok_or_else(|| DatafreteError::NonNumeric {
        field: "valor_frete",
        raw: offer.valor_frete.to_string(),
    })
}

/// Display lead time falling back to the standard one, in working days.
fn offer_days(offer: &RawOffer) -> Result<u32, DatafreteError> {
    parse_days(&offer.prazo_exibicao)
        .or_else(|| parse_days(&offer.prazo))
        .ok_or_else(|| DatafreteError::NonNumeric {
            field: "prazo",
            raw: offer.prazo.to_string(),
        })
}

/// String rendering of scalar wire values; objects/arrays/null yield none.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer coercion for scalar wire values; JSON strings of digits
/// count (`"1"` is 1), non-scalars do not.
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        // going through the literal keeps provider amounts exact
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer lead time; strings keep only the leading digits (`"3 dias"`
/// counts as 3).
fn parse_days(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

fn truncate(value: &str, max_len: usize) -> String {
    value.chars().take(max_len).collect()
}
