//! Core business logic: records, conversion and aggregation

pub mod analytics;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod entry;
pub mod error;
pub mod log;
pub mod stats;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, Converter, FallbackConverter};
pub use currency::{BASE_CURRENCY, RateResolver, supported_currencies};
pub use entry::{Expense, Investment, LedgerEntry, LedgerKind};
pub use error::TrackerError;
