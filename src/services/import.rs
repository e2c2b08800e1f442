//! Transaction import service
//!
//! Reads CSV, TSV, JSON or YAML files with the columns
//! `date, type, category, amount, description` (plus optional `tags`).
//! A file missing any required column is rejected before anything is
//! written. Otherwise rows are recorded one at a time; a row that fails to
//! parse or validate is reported and skipped while the rest carry on.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::export::{DataFormat, REQUIRED_COLUMNS, TAG_SEPARATOR};
use crate::models::{Money, TransactionId, TransactionKind};
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Date layouts tried in order when reading the `date` column
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y",
];

/// A row keyed by lowercase column name
type RawRow = BTreeMap<String, String>;

/// A parsed row, ready to be recorded
#[derive(Debug, Clone)]
pub struct ParsedRow {
    /// 1-based position among the data rows
    pub row: usize,
    pub result: Result<CreateTransactionInput, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: Vec<TransactionId>,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a file, taking the format from `format` or the file extension
    pub fn import_file(
        &self,
        path: &Path,
        format: Option<DataFormat>,
    ) -> FinanceResult<ImportReport> {
        let format = resolve_format(path, format)?;
        let file = File::open(path).map_err(|e| {
            FinanceError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file, format)
    }

    /// Import transactions from any reader
    pub fn import_reader<R: Read>(
        &self,
        reader: R,
        format: DataFormat,
    ) -> FinanceResult<ImportReport> {
        let rows = parse(reader, format)?;
        let service = TransactionService::new(self.storage);

        let mut report = ImportReport {
            total_rows: rows.len(),
            ..Default::default()
        };

        for parsed in rows {
            let outcome = parsed
                .result
                .and_then(|input| service.create(input).map_err(|e| e.to_string()));

            match outcome {
                Ok(txn) => report.imported.push(txn.id),
                Err(message) => {
                    tracing::warn!(row = parsed.row, error = %message, "skipping import row");
                    report.errors.push(RowError {
                        row: parsed.row,
                        message,
                    });
                }
            }
        }

        tracing::info!(
            imported = report.imported_count(),
            failed = report.errors.len(),
            %format,
            "import finished"
        );
        Ok(report)
    }
}

/// Pick the explicit format, else infer it from the file extension
pub fn resolve_format(path: &Path, format: Option<DataFormat>) -> FinanceResult<DataFormat> {
    format.or_else(|| DataFormat::from_path(path)).ok_or_else(|| {
        FinanceError::Import(format!(
            "Cannot tell the format of {}; pass --format",
            path.display()
        ))
    })
}

/// Parse every row without touching storage
///
/// Fails as a whole only when the file cannot be read or lacks a required
/// column; row-level problems are returned inside each [`ParsedRow`].
pub fn parse<R: Read>(reader: R, format: DataFormat) -> FinanceResult<Vec<ParsedRow>> {
    let (columns, rows) = match format {
        DataFormat::Csv | DataFormat::Tsv => {
            read_delimited(reader, format.delimiter().unwrap_or(b','))?
        }
        DataFormat::Json => {
            let value: serde_json::Value = serde_json::from_reader(reader)
                .map_err(|e| FinanceError::Import(format!("Invalid JSON: {}", e)))?;
            rows_from_json(value)?
        }
        DataFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_reader(reader)
                .map_err(|e| FinanceError::Import(format!("Invalid YAML: {}", e)))?;
            rows_from_yaml(value)?
        }
    };

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !columns.contains(*c))
        .collect();
    if !missing.is_empty() {
        return Err(FinanceError::Import(format!(
            "Missing required column(s): {}. Files must contain: {}",
            missing.join(", "),
            REQUIRED_COLUMNS.join(", ")
        )));
    }

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(index, raw)| ParsedRow {
            row: index + 1,
            result: raw.and_then(|raw| parse_row(&raw)),
        })
        .collect())
}

type Table = (BTreeSet<String>, Vec<Result<RawRow, String>>);

fn normalize_column(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn read_delimited<R: Read>(reader: R, delimiter: u8) -> FinanceResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| FinanceError::Import(format!("Failed to read header row: {}", e)))?
        .iter()
        .map(normalize_column)
        .collect();

    let rows = csv_reader
        .records()
        .map(|record| {
            record
                .map(|record| {
                    headers
                        .iter()
                        .cloned()
                        .zip(record.iter().map(str::to_string))
                        .collect()
                })
                .map_err(|e| format!("Unreadable record: {}", e))
        })
        .collect();

    Ok((headers.into_iter().collect(), rows))
}

fn rows_from_json(value: serde_json::Value) -> FinanceResult<Table> {
    let serde_json::Value::Array(items) = value else {
        return Err(FinanceError::Import(
            "JSON import expects an array of transaction objects".into(),
        ));
    };

    let mut columns = BTreeSet::new();
    let rows = items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::Object(fields) => Ok(fields
                .into_iter()
                .map(|(key, value)| {
                    let key = normalize_column(&key);
                    columns.insert(key.clone());
                    (key, json_scalar(value))
                })
                .collect()),
            other => Err(format!("Expected an object, found {}", other)),
        })
        .collect();

    Ok((columns, rows))
}

fn json_scalar(value: serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(json_scalar)
            .collect::<Vec<_>>()
            .join(&TAG_SEPARATOR.to_string()),
        other => other.to_string(),
    }
}

fn rows_from_yaml(value: serde_yaml::Value) -> FinanceResult<Table> {
    let serde_yaml::Value::Sequence(items) = value else {
        return Err(FinanceError::Import(
            "YAML import expects a sequence of transaction mappings".into(),
        ));
    };

    let mut columns = BTreeSet::new();
    let rows = items
        .into_iter()
        .map(|item| match item {
            serde_yaml::Value::Mapping(fields) => Ok(fields
                .into_iter()
                .map(|(key, value)| {
                    let key = normalize_column(&yaml_scalar(key));
                    columns.insert(key.clone());
                    (key, yaml_scalar(value))
                })
                .collect()),
            _ => Err("Expected a mapping".to_string()),
        })
        .collect();

    Ok((columns, rows))
}

fn yaml_scalar(value: serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        Value::Sequence(items) => items
            .into_iter()
            .map(yaml_scalar)
            .collect::<Vec<_>>()
            .join(&TAG_SEPARATOR.to_string()),
        Value::Tagged(tagged) => yaml_scalar(tagged.value),
        Value::Mapping(_) => String::new(),
    }
}

fn field<'r>(row: &'r RawRow, column: &str) -> &'r str {
    row.get(column).map(|s| s.trim()).unwrap_or("")
}

fn parse_row(row: &RawRow) -> Result<CreateTransactionInput, String> {
    let date = parse_date(field(row, "date"))?;
    let kind: TransactionKind = field(row, "type").parse().map_err(|e| format!("{}", e))?;

    let amount_str = field(row, "amount");
    let amount = Money::parse(amount_str)
        .map_err(|_| format!("Could not parse amount '{}'", amount_str))?;

    let mut input = CreateTransactionInput::new(date, kind, field(row, "category"), amount);
    input.description = field(row, "description").to_string();
    input.tags = field(row, "tags")
        .split([TAG_SEPARATOR, ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(input)
}

/// Accepts the listed layouts, plus ISO timestamps whose date part is used
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    s.get(..10)
        .filter(|_| s.len() > 10 && s.as_bytes()[10] == b'T')
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .ok_or_else(|| format!("Could not parse date '{}'", s))
}
