//! Combined expense and investment statistics.

use crate::core::analytics::{ConvertedTotal, aggregate};
use crate::core::conversion::Converter;
use crate::core::entry::{Expense, Investment, LedgerEntry};
use serde::Serialize;
use std::collections::BTreeMap;

pub const CONVERSION_ERROR: &str = "Conversion failed or unavailable";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_expenses: f64,
    pub total_investments: f64,
    pub expense_count: usize,
    pub investment_count: usize,
    pub category_breakdown: BTreeMap<String, f64>,
    pub investment_types: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_expenses_converted: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_investments_converted: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_currency: Option<String>,
    /// Entries summed unconverted because their rate lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_conversions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_error: Option<String>,
}

/// Builds the stats for both ledgers. A blank `target_currency` counts as
/// no target.
pub async fn build_stats(
    expenses: &[Expense],
    investments: &[Investment],
    target_currency: Option<&str>,
    converter: &dyn Converter,
    on_progress: &(dyn Fn() + Sync),
) -> Stats {
    let target = target_currency.filter(|t| !t.trim().is_empty());

    let expense_report = aggregate(expenses, Expense::label, target, converter, on_progress).await;
    let investment_report =
        aggregate(investments, Investment::label, target, converter, on_progress).await;

    let mut stats = Stats {
        total_expenses: expense_report.total,
        total_investments: investment_report.total,
        expense_count: expense_report.count,
        investment_count: investment_report.count,
        category_breakdown: expense_report.breakdown,
        investment_types: investment_report.breakdown,
        total_expenses_converted: None,
        total_investments_converted: None,
        converted_currency: None,
        degraded_conversions: None,
        conversion_error: None,
    };

    match (expense_report.converted, investment_report.converted) {
        (None, None) => {}
        (
            Some(ConvertedTotal::Converted {
                currency,
                total: expenses_total,
                degraded: expenses_degraded,
            }),
            Some(ConvertedTotal::Converted {
                total: investments_total,
                degraded: investments_degraded,
                ..
            }),
        ) => {
            stats.total_expenses_converted = Some(expenses_total);
            stats.total_investments_converted = Some(investments_total);
            stats.converted_currency = Some(currency);
            stats.degraded_conversions = Some(expenses_degraded + investments_degraded);
        }
        _ => stats.conversion_error = Some(CONVERSION_ERROR.to_string()),
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversion::FallbackConverter;
    use crate::core::conversion::tests::MockRateResolver;
    use serde_json::json;

    fn ledgers() -> (Vec<Expense>, Vec<Investment>) {
        (
            vec![
                Expense::new("food", 50.0, "lunch", None).unwrap(),
                Expense::new("food", 25.0, "dinner", Some("INR")).unwrap(),
            ],
            vec![Investment::new("stocks", 1000.0, "10%", "", Some("PLN")).unwrap()],
        )
    }

    #[tokio::test]
    async fn test_stats_without_target() {
        let (expenses, investments) = ledgers();
        let converter = FallbackConverter::new(MockRateResolver::new());

        let stats = build_stats(&expenses, &investments, None, &converter, &|| ()).await;

        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({
                "total_expenses": 75.0,
                "total_investments": 1000.0,
                "expense_count": 2,
                "investment_count": 1,
                "category_breakdown": { "food": 75.0 },
                "investment_types": { "stocks": 1000.0 }
            })
        );
    }

    #[tokio::test]
    async fn test_stats_blank_target_is_ignored() {
        let (expenses, investments) = ledgers();
        let converter = FallbackConverter::new(MockRateResolver::new());

        let stats = build_stats(&expenses, &investments, Some(" "), &converter, &|| ()).await;
        assert_eq!(stats.converted_currency, None);
        assert_eq!(stats.conversion_error, None);
    }

    #[tokio::test]
    async fn test_stats_with_target() {
        let (expenses, investments) = ledgers();
        let resolver = MockRateResolver::new()
            .with_rate("USD", "INR", 80.0)
            .with_rate("PLN", "INR", 20.0);
        let converter = FallbackConverter::new(resolver);

        let stats = build_stats(&expenses, &investments, Some("inr"), &converter, &|| ()).await;

        assert_eq!(stats.total_expenses, 75.0);
        assert_eq!(stats.total_expenses_converted, Some(4025.0));
        assert_eq!(stats.total_investments_converted, Some(20000.0));
        assert_eq!(stats.converted_currency.as_deref(), Some("INR"));
        assert_eq!(stats.degraded_conversions, Some(0));
        assert_eq!(stats.conversion_error, None);
    }

    #[tokio::test]
    async fn test_stats_with_degraded_conversions() {
        let (expenses, investments) = ledgers();
        let converter = FallbackConverter::new(MockRateResolver::new());

        let stats = build_stats(&expenses, &investments, Some("USD"), &converter, &|| ()).await;

        // INR and PLN lookups fail and fall back to the native amounts
        assert_eq!(stats.total_expenses_converted, Some(75.0));
        assert_eq!(stats.total_investments_converted, Some(1000.0));
        assert_eq!(stats.degraded_conversions, Some(2));
        assert_eq!(stats.conversion_error, None);
    }

    #[tokio::test]
    async fn test_stats_conversion_unavailable() {
        let (expenses, investments) = ledgers();
        let converter = FallbackConverter::new(MockRateResolver::new());

        let stats = build_stats(&expenses, &investments, Some("euro"), &converter, &|| ()).await;
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["conversion_error"], CONVERSION_ERROR);
        assert_eq!(value["total_expenses"], 75.0);
        assert!(value.get("total_expenses_converted").is_none());
        assert!(value.get("converted_currency").is_none());
    }
}
