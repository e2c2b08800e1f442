//! Append-only JSONL audit log writer and reader

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FinanceError, FinanceResult};

use super::entry::AuditEntry;

/// Writes audit entries to `audit.log`, one JSON object per line
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush it straight away
    pub fn log(&self, entry: &AuditEntry) -> FinanceResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FinanceError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)?;
        writeln!(file, "{}", json)
            .and_then(|_| file.flush())
            .map_err(|e| FinanceError::Io(format!("Failed to write audit entry: {}", e)))?;

        Ok(())
    }

    /// All entries, oldest first; unparsable lines are skipped with a warning
    pub fn read_all(&self) -> FinanceResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| FinanceError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                FinanceError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "skipping malformed audit entry")
                }
            }
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> FinanceResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
