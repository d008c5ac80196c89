pub mod currencies;
pub mod ledger;
pub mod setup;
pub mod summary;
pub mod ui;
