//! Write-through persistence of in-progress answers
//!
//! The draft lives in a small JSON file under a fixed key, mapping wire keys
//! to the raw values typed so far. Every change is written immediately so a
//! crash or quit loses nothing. One writer, last write wins.

use crate::state::{FieldName, FormRecord};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct DraftFile {
    #[serde(rename = "loanApplicationData", default)]
    values: BTreeMap<String, String>,
}

/// Draft answers, mirrored to disk on every change
#[derive(Debug, Default)]
pub struct DraftStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl DraftStore {
    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Default location of the draft file
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "mayaloan", "mayaloan-tui")
            .map(|dirs| dirs.data_dir().join("draft.json"))
    }

    /// Open the draft at `path`, loading whatever is already there
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading draft {}", path.display()))?;
            match serde_json::from_str::<DraftFile>(&content) {
                Ok(file) => file.values,
                Err(e) => {
                    // The next save overwrites the unreadable file
                    tracing::warn!("Discarding unreadable draft {}: {e}", path.display());
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!("Opened draft with {} saved fields", values.len());
        Ok(Self {
            path: Some(path),
            values,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    /// Merge one value into the draft
    pub fn save(&mut self, field: FieldName, value: &str) -> Result<()> {
        self.values
            .insert(field.key().to_string(), value.to_string());
        self.persist()
    }

    /// Drop one value from the draft
    pub fn remove(&mut self, field: FieldName) -> Result<()> {
        if self.values.remove(field.key()).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Copy saved values into the record, returning how many were applied
    ///
    /// Fields absent from the draft keep their current value. Keys that no
    /// longer name a field are ignored.
    pub fn restore(&self, record: &mut FormRecord) -> usize {
        let mut applied = 0;
        for (key, value) in &self.values {
            match FieldName::from_key(key) {
                Some(field) => {
                    record.set(field, value.clone());
                    applied += 1;
                }
                None => tracing::debug!("Ignoring unknown draft key {key}"),
            }
        }
        applied
    }

    /// Forget everything, removing the file
    pub fn clear(&mut self) -> Result<()> {
        self.values.clear();
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)
                    .with_context(|| format!("removing draft {}", path.display()))?;
            }
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = DraftFile {
            values: self.values.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(path, content).with_context(|| format!("writing draft {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const DRAFT_KEY: &str = "loanApplicationData";

    fn store_in(dir: &TempDir) -> DraftStore {
        DraftStore::open(dir.path().join("draft.json")).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.is_empty());
        assert!(!dir.path().join("draft.json").exists());
    }

    #[test]
    fn test_save_writes_through() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(FieldName::FirstName, "Jane").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get(FieldName::FirstName), Some("Jane"));
    }

    #[test]
    fn test_file_uses_fixed_key() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(FieldName::ZipCode, "90210").unwrap();

        let raw = fs::read_to_string(dir.path().join("draft.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[DRAFT_KEY]["zipCode"], "90210");
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = DraftStore::in_memory();
        store.save(FieldName::City, "Austin").unwrap();
        store.save(FieldName::City, "Dallas").unwrap();
        assert_eq!(store.get(FieldName::City), Some("Dallas"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_restore_leaves_absent_fields_untouched() {
        let mut store = DraftStore::in_memory();
        store.save(FieldName::FirstName, "Jane").unwrap();
        store.save(FieldName::Email, "jane@example.com").unwrap();

        let mut record = FormRecord::new();
        record.set(FieldName::LastName, "Doe");
        record.set(FieldName::FirstName, "Old");

        assert_eq!(store.restore(&mut record), 2);
        assert_eq!(record.get(FieldName::FirstName), "Jane");
        assert_eq!(record.get(FieldName::Email), "jane@example.com");
        assert_eq!(record.get(FieldName::LastName), "Doe");
        assert_eq!(record.get(FieldName::City), "");
    }

    #[test]
    fn test_restore_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(
            &path,
            r#"{"loanApplicationData": {"city": "Reno", "favouriteColour": "blue"}}"#,
        )
        .unwrap();

        let store = DraftStore::open(&path).unwrap();
        let mut record = FormRecord::new();
        assert_eq!(store.restore(&mut record), 1);
        assert_eq!(record.get(FieldName::City), "Reno");
    }

    #[test]
    fn test_remove_drops_single_field() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(FieldName::LoanAmount, "$500 - $1,000").unwrap();
        store
            .save(FieldName::CreditScore, "Good (660-719)")
            .unwrap();
        store.remove(FieldName::CreditScore).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get(FieldName::CreditScore), None);
        assert_eq!(reopened.get(FieldName::LoanAmount), Some("$500 - $1,000"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(FieldName::Ssn, "123-45-6789").unwrap();
        store.clear().unwrap();

        assert!(store.is_empty());
        assert!(!dir.path().join("draft.json").exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty_and_is_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = DraftStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.path(), Some(path.as_path()));

        store.save(FieldName::City, "Reno").unwrap();
        let reopened = DraftStore::open(&path).unwrap();
        assert_eq!(reopened.get(FieldName::City), Some("Reno"));
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as text
        let path = dir.path().join("draft.json");
        fs::create_dir(&path).unwrap();
        assert!(DraftStore::open(&path).is_err());
    }
}
