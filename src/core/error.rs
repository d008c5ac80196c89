//! Domain errors raised by the tracker core.

use crate::core::entry::LedgerKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    /// Rejected at creation time; nothing is appended to the ledger.
    #[error("{0}")]
    InvalidInput(String),

    #[error("No {ledger} record at index {index}")]
    NotFound { ledger: LedgerKind, index: usize },

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),
}
