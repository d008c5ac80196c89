use super::RecordStore;
use crate::core::entry::LedgerKind;
use anyhow::{Context, Result, anyhow};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// fjall keyspace with one partition per ledger. Keys are big-endian record
/// indices so partition order is ledger order.
pub struct DiskStore {
    keyspace: Keyspace,
    expenses: PartitionHandle,
    investments: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open keyspace at {}", path.display()))?;
        let expenses = keyspace.open_partition(
            LedgerKind::Expenses.name(),
            PartitionCreateOptions::default(),
        )?;
        let investments = keyspace.open_partition(
            LedgerKind::Investments.name(),
            PartitionCreateOptions::default(),
        )?;
        debug!("Opened keyspace at {}", path.display());

        Ok(Self {
            keyspace,
            expenses,
            investments,
        })
    }

    fn partition(&self, ledger: LedgerKind) -> &PartitionHandle {
        match ledger {
            LedgerKind::Expenses => &self.expenses,
            LedgerKind::Investments => &self.investments,
        }
    }
}

fn index_key(index: usize) -> Vec<u8> {
    (index as u64).to_be_bytes().to_vec()
}

fn key_index(key: &[u8]) -> Result<usize> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| anyhow!("Invalid record key of {} bytes", key.len()))?;
    Ok(u64::from_be_bytes(bytes) as usize)
}

impl RecordStore for DiskStore {
    fn read(&self, ledger: LedgerKind) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        for item in self.partition(ledger).iter() {
            let (_, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    fn write(&self, ledger: LedgerKind, records: Vec<Value>) -> Result<()> {
        let partition = self.partition(ledger);
        let mut batch = self.keyspace.batch();

        for item in partition.keys() {
            let key = item?;
            if key_index(&key)? >= records.len() {
                batch.remove(partition, key);
            }
        }
        for (index, record) in records.iter().enumerate() {
            batch.insert(partition, index_key(index), serde_json::to_vec(record)?);
        }

        batch.commit()?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Wrote {} {} records", records.len(), ledger);
        Ok(())
    }
}
