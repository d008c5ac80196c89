//! Totals, breakdowns and converted totals over a ledger.
use crate::core::conversion::Converter;
use crate::core::currency::parse_target_currency;
use crate::core::entry::{DATE_FORMAT, LedgerEntry};
use std::collections::BTreeMap;
use tracing::debug;

/// Converted total of a ledger, or the reason it could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertedTotal {
    Converted {
        currency: String,
        total: f64,
        /// Entries whose lookup failed and were summed unconverted.
        degraded: usize,
    },
    Unavailable {
        reason: String,
    },
}

/// Aggregated view of one ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Sum of native amounts; currencies are not normalized.
    pub total: f64,
    pub count: usize,
    pub breakdown: BTreeMap<String, f64>,
    /// Present only when a target currency was requested.
    pub converted: Option<ConvertedTotal>,
}

/// Sums a ledger, groups it by `group_key` and, when `target_currency` is
/// given, converts every entry into it through `converter`.
///
/// Failed lookups are absorbed by the converter; a malformed target currency
/// yields [`ConvertedTotal::Unavailable`] while the native figures stay intact.
/// `on_progress` runs once per converted entry.
pub async fn aggregate<E, K>(
    ledger: &[E],
    group_key: K,
    target_currency: Option<&str>,
    converter: &dyn Converter,
    on_progress: &(dyn Fn() + Sync),
) -> Report
where
    E: LedgerEntry,
    K: Fn(&E) -> &str,
{
    let mut total = 0.0;
    let mut breakdown = BTreeMap::new();
    for entry in ledger {
        total += entry.amount();
        *breakdown.entry(group_key(entry).to_string()).or_insert(0.0) += entry.amount();
    }

    let converted = match target_currency {
        Some(target) => Some(convert_total(ledger, target, converter, on_progress).await),
        None => None,
    };

    Report {
        total,
        count: ledger.len(),
        breakdown,
        converted,
    }
}

async fn convert_total<E: LedgerEntry>(
    ledger: &[E],
    target: &str,
    converter: &dyn Converter,
    on_progress: &(dyn Fn() + Sync),
) -> ConvertedTotal {
    let target = match parse_target_currency(target) {
        Ok(code) => code,
        Err(e) => {
            debug!("Skipping {} conversion: {}", E::KIND, e);
            return ConvertedTotal::Unavailable {
                reason: e.to_string(),
            };
        }
    };

    let mut total = 0.0;
    let mut degraded = 0;
    for entry in ledger {
        let conversion = converter
            .convert(entry.amount(), entry.currency(), &target)
            .await;
        total += conversion.value;
        if conversion.degraded {
            degraded += 1;
        }
        on_progress();
    }
    debug!(
        "Converted {} {} entries into {}: {} ({} degraded)",
        ledger.len(),
        E::KIND,
        target,
        total,
        degraded
    );

    ConvertedTotal::Converted {
        currency: target,
        total,
        degraded,
    }
}

/// Formats an amount so whole numbers keep their decimal point (`50.0`).
pub fn format_amount(amount: f64) -> String {
    format!("{amount:?}")
}

/// Human readable listing of a ledger in entry order followed by its total.
pub fn render_summary<E: LedgerEntry>(ledger: &[E]) -> String {
    if ledger.is_empty() {
        return E::KIND.empty_message().to_string();
    }

    let total: f64 = ledger.iter().map(|e| e.amount()).sum();
    let mut summary = format!("\n--- {} ---\n", E::KIND.title());
    for entry in ledger {
        let mut columns = vec![
            entry.base().date.format(DATE_FORMAT).to_string(),
            entry.label().to_string(),
            format!("{} {}", format_amount(entry.amount()), entry.currency()),
        ];
        columns.extend(entry.details().into_iter().map(str::to_string));
        summary.push_str(&columns.join(" | "));
        summary.push('\n');
    }
    summary.push_str(&format!(
        "\n{}: {}\n",
        E::KIND.total_label(),
        format_amount(total)
    ));
    summary
}
