//! # Structure History
//!
//! File: cli/src/common/storage/history.rs
//!
//! ## Overview
//!
//! Every structure `arbor create` builds is appended to a history file so it
//! can be listed, inspected and recreated later. A record is a hierarchy with
//! one top-level entry, `{ "<project>": { ... } }`, and the project name is
//! its label.
//!
//! ## File format
//!
//! A JSON array of records, indented by four spaces:
//!
//! ```json
//! [
//!     {
//!         "demo": {
//!             "src": {
//!                 "main.rs": null
//!             }
//!         }
//!     }
//! ]
//! ```
//!
//! Loading never fails: a missing or empty file is an empty history, and an
//! unreadable or malformed file is reported with a warning and treated as
//! empty. Individual malformed records are skipped when reading but kept in
//! the file: appending rewrites every existing element. Only a file that is
//! not a JSON array at all is replaced.
//!
use crate::common::fs::io::{read_file_to_string, write_string_to_file};
use crate::core::error::{ArborError, Result};
use crate::core::hierarchy::{to_pretty_json, Hierarchy};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ordered, append-only storage of created structures.
pub trait HistoryStore {
    /// Adds `record` after every existing record.
    fn append(&mut self, record: &Hierarchy) -> Result<()>;

    /// All records, oldest first.
    fn load_all(&self) -> Vec<Hierarchy>;

    /// The record at 1-based `position`, as shown by `history list`.
    fn get(&self, position: usize) -> Result<Hierarchy> {
        let mut records = self.load_all();
        let count = records.len();
        if position == 0 || position > count {
            anyhow::bail!(ArborError::History(format!(
                "No history entry {} ({} entr{} recorded)",
                position,
                count,
                if count == 1 { "y" } else { "ies" }
            )));
        }
        Ok(records.swap_remove(position - 1))
    }
}

/// History kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonHistoryFile {
    fn append(&mut self, record: &Hierarchy) -> Result<()> {
        let mut records = read_stored(&self.path)?;
        records.push(StoredRecord::Record(record.clone()));
        let json = to_pretty_json(&records)?;
        write_string_to_file(&self.path, &json)
            .with_context(|| format!("Failed to save history to {:?}", self.path))?;
        debug!(
            "Appended history record {:?} ({} total)",
            record.project_name(),
            records.len()
        );
        Ok(())
    }

    fn load_all(&self) -> Vec<Hierarchy> {
        let stored = match read_stored(&self.path) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring unreadable history file: {:#}", e);
                return Vec::new();
            }
        };
        stored
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                StoredRecord::Record(record) => Some(record),
                StoredRecord::Malformed(_) => {
                    warn!("Skipping malformed history entry {}", index + 1);
                    None
                }
            })
            .collect()
    }
}

/// One array element: a usable record, or any other JSON value kept as is.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Record(Hierarchy),
    Malformed(serde_json::Value),
}

/// Every element of the history file. A missing, empty or malformed file
/// reads as no elements; only a read failure is an error.
fn read_stored(path: &Path) -> Result<Vec<StoredRecord>> {
    if !path.exists() {
        debug!("No history file at {:?}", path);
        return Ok(Vec::new());
    }
    let content = read_file_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str(&content) {
        Ok(stored) => Ok(stored),
        Err(e) => {
            warn!("Ignoring malformed history file {:?}: {}", path, e);
            Ok(Vec::new())
        }
    }
}

/// Volatile history used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: Vec<Hierarchy>,
}

#[cfg(test)]
impl HistoryStore for MemoryHistory {
    fn append(&mut self, record: &Hierarchy) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn load_all(&self) -> Vec<Hierarchy> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(json: &str) -> Hierarchy {
        Hierarchy::from_json(json).unwrap()
    }

    #[test]
    fn test_missing_and_empty_files_are_empty_history() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonHistoryFile::new(dir.path().join("history.json"));
        assert!(store.load_all().is_empty());

        fs::write(store.path(), "  \n")?;
        assert!(store.load_all().is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_empty_history() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonHistoryFile::new(dir.path().join("history.json"));
        fs::write(store.path(), "{not json")?;
        assert!(store.load_all().is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_entries_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonHistoryFile::new(dir.path().join("history.json"));
        fs::write(
            store.path(),
            r#"[{"a": {}}, 42, {"b": {"z.txt": null, "a.txt": null}}]"#,
        )?;
        let records = store.load_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].project_name(), Some("b"));
        // Entry order is kept as written.
        assert_eq!(
            serde_json::to_string(&records[1])?,
            r#"{"b":{"z.txt":null,"a.txt":null}}"#
        );
        Ok(())
    }

    #[test]
    fn test_append_preserves_order_and_format() -> Result<()> {
        let dir = tempdir()?;
        let mut store = JsonHistoryFile::new(dir.path().join("nested/history.json"));
        store.append(&record(r#"{"first": {"main.py": null}}"#))?;
        store.append(&record(r#"{"second": {}}"#))?;

        let labels: Vec<String> = store
            .load_all()
            .iter()
            .filter_map(|r| r.project_name().map(str::to_string))
            .collect();
        assert_eq!(labels, ["first", "second"]);

        let on_disk = fs::read_to_string(store.path())?;
        assert!(on_disk.starts_with("[\n    {\n        \"first\": {\n            \"main.py\": null"));
        Ok(())
    }

    #[test]
    fn test_append_keeps_unrecognized_entries() -> Result<()> {
        let dir = tempdir()?;
        let mut store = JsonHistoryFile::new(dir.path().join("history.json"));
        fs::write(
            store.path(),
            r#"[{"a": {"z.txt": null, "m.txt": null}}, {"b": "legacy"}, 7]"#,
        )?;
        store.append(&record(r#"{"c": {}}"#))?;

        let text = fs::read_to_string(store.path())?;
        let on_disk: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(
            on_disk,
            serde_json::json!([{"a": {"z.txt": null, "m.txt": null}}, {"b": "legacy"}, 7, {"c": {}}])
        );
        // Readable records keep their entry order on rewrite.
        assert!(text.find("z.txt") < text.find("m.txt"));

        let labels: Vec<String> = store
            .load_all()
            .iter()
            .filter_map(|r| r.project_name().map(str::to_string))
            .collect();
        assert_eq!(labels, ["a", "c"]);
        Ok(())
    }

    #[test]
    fn test_append_after_corruption_starts_fresh() -> Result<()> {
        let dir = tempdir()?;
        let mut store = JsonHistoryFile::new(dir.path().join("history.json"));
        fs::write(store.path(), "garbage")?;
        store.append(&record(r#"{"fresh": {}}"#))?;
        assert_eq!(store.load_all().len(), 1);
        Ok(())
    }

    #[test]
    fn test_get_is_one_based() -> Result<()> {
        let mut store = MemoryHistory::default();
        store.append(&record(r#"{"a": {}}"#))?;
        store.append(&record(r#"{"b": {}}"#))?;
        assert_eq!(store.get(2)?.project_name(), Some("b"));
        assert!(store.get(0).is_err());
        let err = store.get(3).unwrap_err();
        assert!(err.to_string().contains("No history entry 3 (2 entries recorded)"));
        Ok(())
    }
}
