//! Import and export commands

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{FinanceError, FinanceResult};
use crate::export::{export_transactions, DataFormat};
use crate::services::{ImportService, TransactionFilter};
use crate::storage::Storage;

use super::{parse_optional_date, parse_value};

/// Import transactions from a CSV, TSV, JSON or YAML file
pub fn handle_import_command(
    storage: &Storage,
    file: &Path,
    format: Option<&str>,
) -> FinanceResult<()> {
    if !file.exists() {
        return Err(FinanceError::Import(format!("File not found: {}", file.display())));
    }
    let format = format.map(parse_value::<DataFormat>).transpose()?;

    let report = ImportService::new(storage).import_file(file, format)?;

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Rows read:   {}", report.total_rows);
    println!("  Imported:    {}", report.imported_count());
    println!("  Failed:      {}", report.errors.len());

    if !report.is_clean() {
        println!();
        println!("Rows that were not imported:");
        for error in &report.errors {
            println!("  row {}: {}", error.row, error.message);
        }
    }
    Ok(())
}

/// Export transactions to a file
pub fn handle_export_command(
    storage: &Storage,
    file: &Path,
    format: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> FinanceResult<()> {
    let format = match format {
        Some(f) => parse_value::<DataFormat>(f)?,
        None => DataFormat::from_path(file).unwrap_or(DataFormat::Csv),
    };
    let filter = TransactionFilter::new()
        .date_range(parse_optional_date(start)?, parse_optional_date(end)?);
    filter.validate()?;

    let out = File::create(file).map_err(|e| {
        FinanceError::Export(format!("Failed to create {}: {}", file.display(), e))
    })?;
    let count = export_transactions(storage, BufWriter::new(out), format, &filter)?;

    println!("Exported {} transaction(s) to {} ({})", count, file.display(), format);
    Ok(())
}
