use super::RecordStore;
use crate::core::entry::LedgerKind;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// One pretty-printed JSON array per ledger, e.g. `<dir>/expenses.json`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn ledger_path(&self, ledger: LedgerKind) -> PathBuf {
        self.dir.join(format!("{}.json", ledger.name()))
    }
}

impl RecordStore for JsonFileStore {
    fn read(&self, ledger: LedgerKind) -> Result<Vec<Value>> {
        let path = self.ledger_path(ledger);
        if !path.exists() {
            debug!("No ledger file at {}", path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read ledger file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse ledger file: {}", path.display()))
    }

    fn write(&self, ledger: LedgerKind, records: Vec<Value>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.ledger_path(ledger);
        let content = serde_json::to_string_pretty(&records)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write ledger file: {}", path.display()))?;
        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_round_trips_raw_records() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let records = vec![json!({"name": "test", "value": 100})];

        store.write(LedgerKind::Expenses, records.clone()).unwrap();

        assert_eq!(store.read(LedgerKind::Expenses).unwrap(), records);
        assert!(store.read(LedgerKind::Investments).unwrap().is_empty());
        assert!(dir.path().join("expenses.json").exists());
        assert!(!dir.path().join("investments.json").exists());
    }

    #[test]
    fn test_reads_legacy_file() {
        let dir = tempdir().unwrap();
        let legacy = r#"[
    {
        "category": "food",
        "amount": 50.0,
        "note": "lunch",
        "date": "2025-01-02 13:45"
    }
]"#;
        fs::write(dir.path().join("expenses.json"), legacy).unwrap();

        let store = JsonFileStore::new(dir.path());
        let records = store.read(LedgerKind::Expenses).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["category"], "food");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("investments.json"), "{not json").unwrap();

        let store = JsonFileStore::new(dir.path());
        let err = store.read(LedgerKind::Investments).unwrap_err();
        assert!(err.to_string().contains("Failed to parse ledger file"));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data"));
        store.write(LedgerKind::Investments, Vec::new()).unwrap();
        assert!(store.ledger_path(LedgerKind::Investments).exists());
    }
}
