pub mod disk;
pub mod json;

use crate::core::config::{AppConfig, StoreKind};
use crate::core::entry::{LedgerEntry, LedgerKind};
use crate::core::error::TrackerError;
use anyhow::{Context, Result};
use disk::DiskStore;
use json::JsonFileStore;
use serde_json::Value;
use tracing::info;

/// Ordered, whole-ledger persistence of raw records.
pub trait RecordStore: Send + Sync {
    /// Records of `ledger` in insertion order; an absent ledger reads as empty.
    fn read(&self, ledger: LedgerKind) -> Result<Vec<Value>>;

    /// Replaces the contents of `ledger`.
    fn write(&self, ledger: LedgerKind, records: Vec<Value>) -> Result<()>;
}

/// Typed ledger operations on top of any [`RecordStore`].
pub trait LedgerStore: RecordStore {
    fn load<E: LedgerEntry>(&self) -> Result<Vec<E>> {
        self.read(E::KIND)?
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(record)
                    .with_context(|| format!("Malformed {} record at index {}", E::KIND, index))
            })
            .collect()
    }

    fn save<E: LedgerEntry>(&self, entries: &[E]) -> Result<()> {
        let records = entries
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.write(E::KIND, records)
    }

    fn append<E: LedgerEntry>(&self, entry: E) -> Result<E> {
        let mut entries = self.load::<E>()?;
        entries.push(entry.clone());
        self.save(&entries)?;
        info!("Appended {} record #{}", E::KIND, entries.len() - 1);
        Ok(entry)
    }

    fn replace<E: LedgerEntry>(&self, index: usize, entry: E) -> Result<E> {
        let mut entries = self.load::<E>()?;
        let slot = entries.get_mut(index).ok_or(TrackerError::NotFound {
            ledger: E::KIND,
            index,
        })?;
        *slot = entry.clone();
        self.save(&entries)?;
        info!("Updated {} record #{}", E::KIND, index);
        Ok(entry)
    }

    fn remove<E: LedgerEntry>(&self, index: usize) -> Result<E> {
        let mut entries = self.load::<E>()?;
        if index >= entries.len() {
            return Err(TrackerError::NotFound {
                ledger: E::KIND,
                index,
            }
            .into());
        }
        let removed = entries.remove(index);
        self.save(&entries)?;
        info!("Deleted {} record #{}", E::KIND, index);
        Ok(removed)
    }
}

impl<S: RecordStore + ?Sized> LedgerStore for S {}

/// Opens the backend selected in the config at its data path.
pub fn open(config: &AppConfig) -> Result<Box<dyn RecordStore>> {
    let path = config.data_path()?;
    let store: Box<dyn RecordStore> = match config.store {
        StoreKind::Json => Box::new(JsonFileStore::new(path)),
        StoreKind::Fjall => Box::new(DiskStore::open(&path)?),
    };
    Ok(store)
}
