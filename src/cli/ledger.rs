use crate::core::analytics::render_summary;
use crate::core::{Expense, Investment, LedgerEntry};
use crate::store::{LedgerStore, RecordStore};
use anyhow::Result;

pub fn add_expense(
    store: &dyn RecordStore,
    category: &str,
    amount: f64,
    note: &str,
    currency: Option<&str>,
) -> Result<Expense> {
    let expense = store.append(Expense::new(category, amount, note, currency)?)?;
    println!("Expense added successfully!");
    Ok(expense)
}

pub fn add_investment(
    store: &dyn RecordStore,
    kind: &str,
    amount: f64,
    returns: &str,
    note: &str,
    currency: Option<&str>,
) -> Result<Investment> {
    let investment = store.append(Investment::new(kind, amount, returns, note, currency)?)?;
    println!("Investment added successfully!");
    Ok(investment)
}

pub fn update_expense(
    store: &dyn RecordStore,
    index: usize,
    category: Option<&str>,
    amount: Option<f64>,
    note: Option<&str>,
) -> Result<Expense> {
    let current = existing::<Expense>(store, index)?;
    let updated = store.replace(index, current.amended(category, amount, note)?)?;
    println!("Expense #{index} updated.");
    Ok(updated)
}

pub fn update_investment(
    store: &dyn RecordStore,
    index: usize,
    kind: Option<&str>,
    amount: Option<f64>,
    returns: Option<&str>,
    note: Option<&str>,
) -> Result<Investment> {
    let current = existing::<Investment>(store, index)?;
    let updated = store.replace(index, current.amended(kind, amount, returns, note)?)?;
    println!("Investment #{index} updated.");
    Ok(updated)
}

pub fn delete<E: LedgerEntry>(store: &dyn RecordStore, index: usize) -> Result<E> {
    let removed = store.remove::<E>(index)?;
    println!("Deleted {} record #{index}.", E::KIND);
    Ok(removed)
}

pub fn list<E: LedgerEntry>(store: &dyn RecordStore) -> Result<()> {
    let entries = store.load::<E>()?;
    println!("{}", render_summary(&entries));
    Ok(())
}

fn existing<E: LedgerEntry>(store: &dyn RecordStore, index: usize) -> Result<E> {
    store
        .load::<E>()?
        .into_iter()
        .nth(index)
        .ok_or_else(|| {
            crate::core::TrackerError::NotFound {
                ledger: E::KIND,
                index,
            }
            .into()
        })
}
