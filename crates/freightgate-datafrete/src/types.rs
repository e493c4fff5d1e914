//! Datafrete wire schemas.
//!
//! The quote API takes Portuguese field names and answers with fields that
//! may be strings or numbers depending on the tariff table. Outbound types
//! are strictly typed; inbound ones keep [`Value`] wherever the wire type
//! varies and let [`crate::normalize`] coerce.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platform tag carried on every quote request.
pub const PLATFORM_TAG: &str = "ECOM";

/// Outbound quote request.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    pub token: String,
    #[serde(rename = "cepOrigem")]
    pub cep_origem: String,
    #[serde(rename = "cepDestino")]
    pub cep_destino: String,
    #[serde(rename = "infComp")]
    pub company: CompanyInfo,
    pub produtos: Vec<QuoteItem>,
}

/// Company-identifier envelope.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyInfo {
    pub doc_empresa: String,
    pub plataforma: &'static str,
}

/// One cart line in Datafrete's schema: dimensions in centimeters, weight
/// in kilograms.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub altura: f64,
    pub largura: f64,
    pub comprimento: f64,
    pub peso: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    pub qtd: u32,
    /// Required by the schema; the integration never computes real volume.
    pub volume: u32,
}

/// A single service offer inside a successful quote response. Every field
/// has shown up as both string and number in the wild, so they stay raw
/// until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOffer {
    #[serde(default)]
    pub cod_tabela: Value,
    #[serde(default)]
    pub nome_transportador: Value,
    #[serde(default)]
    pub cnpj_transportador: Value,
    #[serde(default)]
    pub descricao: Value,
    #[serde(default)]
    pub valor_frete: Value,
    #[serde(default)]
    pub valor_frete_exibicao: Value,
    #[serde(default)]
    pub prazo: Value,
    #[serde(default)]
    pub prazo_exibicao: Value,
}
