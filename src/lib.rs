pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

// Re-export for convenience
pub use crate::core::config;

use crate::core::{Expense, FallbackConverter, Investment};
use anyhow::Result;
use providers::HttpRateResolver;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    AddExpense {
        category: String,
        amount: f64,
        note: String,
        currency: Option<String>,
    },
    AddInvestment {
        kind: String,
        amount: f64,
        returns: String,
        note: String,
        currency: Option<String>,
    },
    UpdateExpense {
        index: usize,
        category: Option<String>,
        amount: Option<f64>,
        note: Option<String>,
    },
    UpdateInvestment {
        index: usize,
        kind: Option<String>,
        amount: Option<f64>,
        returns: Option<String>,
        note: Option<String>,
    },
    DeleteExpense {
        index: usize,
    },
    DeleteInvestment {
        index: usize,
    },
    ListExpenses,
    ListInvestments,
    Stats {
        target_currency: Option<String>,
        json: bool,
    },
    Currencies {
        json: bool,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Finance tracker starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let record_store = store::open(&config)?;
    let store = &*record_store;

    match command {
        AppCommand::AddExpense {
            category,
            amount,
            note,
            currency,
        } => {
            cli::ledger::add_expense(store, &category, amount, &note, currency.as_deref())?;
        }
        AppCommand::AddInvestment {
            kind,
            amount,
            returns,
            note,
            currency,
        } => {
            cli::ledger::add_investment(
                store,
                &kind,
                amount,
                &returns,
                &note,
                currency.as_deref(),
            )?;
        }
        AppCommand::UpdateExpense {
            index,
            category,
            amount,
            note,
        } => {
            cli::ledger::update_expense(
                store,
                index,
                category.as_deref(),
                amount,
                note.as_deref(),
            )?;
        }
        AppCommand::UpdateInvestment {
            index,
            kind,
            amount,
            returns,
            note,
        } => {
            cli::ledger::update_investment(
                store,
                index,
                kind.as_deref(),
                amount,
                returns.as_deref(),
                note.as_deref(),
            )?;
        }
        AppCommand::DeleteExpense { index } => {
            cli::ledger::delete::<Expense>(store, index)?;
        }
        AppCommand::DeleteInvestment { index } => {
            cli::ledger::delete::<Investment>(store, index)?;
        }
        AppCommand::ListExpenses => cli::ledger::list::<Expense>(store)?,
        AppCommand::ListInvestments => cli::ledger::list::<Investment>(store)?,
        AppCommand::Stats {
            target_currency,
            json,
        } => {
            let rates = &config.providers.rates;
            let resolver =
                HttpRateResolver::new(&rates.base_url, Duration::from_secs(rates.timeout_secs));
            let converter = FallbackConverter::new(resolver);
            let target = target_currency.or_else(|| config.currency.clone());

            cli::summary::run(store, &converter, target.as_deref(), json).await?;
        }
        AppCommand::Currencies { json } => cli::currencies::run(json)?,
    }

    Ok(())
}
