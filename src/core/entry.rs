//! Expense and investment records.

use crate::core::currency::normalize_currency;
use crate::core::error::TrackerError;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Identifies one of the two ledgers the tracker keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Expenses,
    Investments,
}

impl LedgerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerKind::Expenses => "expenses",
            LedgerKind::Investments => "investments",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LedgerKind::Expenses => "Expense Summary",
            LedgerKind::Investments => "Investment Summary",
        }
    }

    pub fn total_label(&self) -> &'static str {
        match self {
            LedgerKind::Expenses => "Total Spent",
            LedgerKind::Investments => "Total Invested",
        }
    }

    /// Sentence rendered in place of a summary when the ledger is empty.
    pub fn empty_message(&self) -> &'static str {
        match self {
            LedgerKind::Expenses => "No expenses recorded yet.",
            LedgerKind::Investments => "No investments recorded yet.",
        }
    }
}

impl Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Timestamps are kept at minute resolution, e.g. `2025-01-31 18:05`.
mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(
        date: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

pub use minute_format::FORMAT as DATE_FORMAT;

fn now_to_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

fn validate(label: &str, amount: f64, label_name: &str) -> Result<(), TrackerError> {
    if amount < 0.0 {
        return Err(TrackerError::InvalidInput("Amount cannot be negative".to_string()));
    }
    if !amount.is_finite() {
        return Err(TrackerError::InvalidInput("Amount must be a finite number".to_string()));
    }
    if label.trim().is_empty() {
        return Err(TrackerError::InvalidInput(format!(
            "{label_name} must be a non-empty string"
        )));
    }
    Ok(())
}

/// Fields shared by every ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBase {
    pub amount: f64,
    #[serde(default = "default_currency", deserialize_with = "stored_currency")]
    pub currency: String,
    #[serde(default)]
    pub note: String,
    #[serde(with = "minute_format")]
    pub date: NaiveDateTime,
}

fn default_currency() -> String {
    normalize_currency(None)
}

/// Stored codes may be lowercase, blank or null.
fn stored_currency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_currency(code.as_deref()))
}

impl EntryBase {
    fn new(amount: f64, note: &str, currency: Option<&str>) -> Self {
        Self {
            amount,
            currency: normalize_currency(currency),
            note: note.to_string(),
            date: now_to_minute(),
        }
    }
}

/// Behaviour the aggregator and the stores need from a ledger record.
pub trait LedgerEntry: Serialize + DeserializeOwned + Clone + Send + Sync {
    const KIND: LedgerKind;

    fn base(&self) -> &EntryBase;

    /// Grouping label: category for expenses, type for investments.
    fn label(&self) -> &str;

    /// Trailing columns of a summary line.
    fn details(&self) -> Vec<&str>;

    fn amount(&self) -> f64 {
        self.base().amount
    }

    fn currency(&self) -> &str {
        &self.base().currency
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub category: String,
    #[serde(flatten)]
    pub base: EntryBase,
}

impl Expense {
    /// Validates and timestamps a new expense.
    pub fn new(
        category: &str,
        amount: f64,
        note: &str,
        currency: Option<&str>,
    ) -> Result<Self, TrackerError> {
        validate(category, amount, "Category")?;
        Ok(Self {
            category: category.to_string(),
            base: EntryBase::new(amount, note, currency),
        })
    }

    /// Replacement record for an update. `date` and `currency` are kept.
    pub fn amended(
        &self,
        category: Option<&str>,
        amount: Option<f64>,
        note: Option<&str>,
    ) -> Result<Self, TrackerError> {
        let category = category.unwrap_or(&self.category);
        let amount = amount.unwrap_or(self.base.amount);
        validate(category, amount, "Category")?;

        let mut updated = self.clone();
        updated.category = category.to_string();
        updated.base.amount = amount;
        if let Some(note) = note {
            updated.base.note = note.to_string();
        }
        Ok(updated)
    }
}

impl LedgerEntry for Expense {
    const KIND: LedgerKind = LedgerKind::Expenses;

    fn base(&self) -> &EntryBase {
        &self.base
    }

    fn label(&self) -> &str {
        &self.category
    }

    fn details(&self) -> Vec<&str> {
        vec![&self.base.note]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub returns: String,
    #[serde(flatten)]
    pub base: EntryBase,
}

impl Investment {
    /// Validates and timestamps a new investment.
    pub fn new(
        kind: &str,
        amount: f64,
        returns: &str,
        note: &str,
        currency: Option<&str>,
    ) -> Result<Self, TrackerError> {
        validate(kind, amount, "Investment type")?;
        Ok(Self {
            kind: kind.to_string(),
            returns: returns.to_string(),
            base: EntryBase::new(amount, note, currency),
        })
    }

    pub fn amended(
        &self,
        kind: Option<&str>,
        amount: Option<f64>,
        returns: Option<&str>,
        note: Option<&str>,
    ) -> Result<Self, TrackerError> {
        let kind = kind.unwrap_or(&self.kind);
        let amount = amount.unwrap_or(self.base.amount);
        validate(kind, amount, "Investment type")?;

        let mut updated = self.clone();
        updated.kind = kind.to_string();
        updated.base.amount = amount;
        if let Some(returns) = returns {
            updated.returns = returns.to_string();
        }
        if let Some(note) = note {
            updated.base.note = note.to_string();
        }
        Ok(updated)
    }
}

impl LedgerEntry for Investment {
    const KIND: LedgerKind = LedgerKind::Investments;

    fn base(&self) -> &EntryBase {
        &self.base
    }

    fn label(&self) -> &str {
        &self.kind
    }

    fn details(&self) -> Vec<&str> {
        vec![&self.returns, &self.base.note]
    }
}
