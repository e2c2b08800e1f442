//! Transaction export
//!
//! Transactions are written as flat records with the columns
//! `date, type, category, amount, description, tags` in one of four formats:
//! - CSV
//! - TSV, the spreadsheet format (tab-separated, opens directly in
//!   spreadsheet applications)
//! - JSON, an array of records
//! - YAML, a sequence of records
//!
//! The importer reads the same formats and columns.

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Transaction;
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Columns every import file must provide
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "type", "category", "amount", "description"];

/// Separator used for the tags column in flat formats
pub const TAG_SEPARATOR: char = ',';

/// File formats understood by import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Tsv,
    Json,
    Yaml,
}

impl DataFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Field delimiter for the delimited formats
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Json | Self::Yaml => None,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.extension())
    }
}

impl FromStr for DataFormat {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" | "spreadsheet" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(FinanceError::Validation(format!(
                "Unknown format '{}': use csv, tsv, json or yaml",
                other
            ))),
        }
    }
}

/// One exported transaction row
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub tags: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        let separator = TAG_SEPARATOR.to_string();
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: txn.amount.as_f64(),
            description: txn.description.clone(),
            tags: txn.tags.iter().cloned().collect::<Vec<_>>().join(&separator),
        }
    }
}

/// Write the transactions matching `filter`, oldest first
///
/// Returns the number of records written.
pub fn export_transactions<W: Write>(
    storage: &Storage,
    writer: W,
    format: DataFormat,
    filter: &TransactionFilter,
) -> FinanceResult<usize> {
    let mut transactions = TransactionService::new(storage).list(filter)?;
    transactions.reverse();

    let records: Vec<TransactionRecord> =
        transactions.iter().map(TransactionRecord::from).collect();

    match format {
        DataFormat::Csv | DataFormat::Tsv => {
            csv::write_records(writer, &records, format.delimiter().unwrap_or(b','))?
        }
        DataFormat::Json => json::write_records(writer, &records)?,
        DataFormat::Yaml => yaml::write_records(writer, &records)?,
    }

    tracing::info!(count = records.len(), %format, "exported transactions");
    Ok(records.len())
}
