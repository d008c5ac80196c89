//! Currency catalog and conversion abstractions

use crate::core::error::TrackerError;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Currency assumed for entries recorded without one.
pub const BASE_CURRENCY: &str = "USD";

const SUPPORTED_CURRENCIES: [&str; 3] = ["PLN", "USD", "INR"];

/// The fixed set of currencies offered for selection.
pub fn supported_currencies() -> &'static [&'static str] {
    &SUPPORTED_CURRENCIES
}

/// Wire shape of the currency catalog: `{ "symbols": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyCatalog {
    pub symbols: Vec<String>,
}

impl Default for CurrencyCatalog {
    fn default() -> Self {
        Self {
            symbols: supported_currencies()
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Upper-cases a currency code, substituting the base currency when it is
/// missing or blank.
pub fn normalize_currency(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_uppercase(),
        _ => BASE_CURRENCY.to_string(),
    }
}

/// Normalizes a requested target currency and checks it is a three letter code.
pub fn parse_target_currency(code: &str) -> Result<String, TrackerError> {
    let normalized = normalize_currency(Some(code));
    if normalized.len() == 3 && normalized.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(normalized)
    } else {
        Err(TrackerError::InvalidCurrency(code.to_string()))
    }
}

/// Expresses an amount in another currency using an external rate source.
#[async_trait]
pub trait RateResolver: Send + Sync {
    async fn resolve(&self, amount: f64, from: &str, to: &str) -> Result<f64>;
}
