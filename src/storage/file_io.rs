//! JSON file helpers shared by the repositories
//!
//! Every table is one pretty-printed JSON document. Writes go to a temp file
//! that is synced and renamed over the original.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanceError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no file yet, using empty table");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| FinanceError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| FinanceError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinanceError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinanceError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinanceError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinanceError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinanceError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Table {
        rows: Vec<(String, i64)>,
    }

    fn sample() -> Table {
        Table {
            rows: vec![("Food".into(), 30000), ("Rent".into(), 120000)],
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let table: Table = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("table.json");

        write_json_atomic(&path, &sample()).unwrap();
        let loaded: Table = read_json(&path).unwrap();

        assert_eq!(loaded, sample());
        assert!(!temp_dir.path().join("table.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nested").join("table.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("table.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Table, _>(&path).unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
    }
}
