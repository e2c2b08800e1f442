//! YAML writer

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};

use super::TransactionRecord;

/// Write records as a YAML sequence, preceded by a comment header
pub fn write_records<W: Write>(mut writer: W, records: &[TransactionRecord]) -> FinanceResult<()> {
    let exported = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
    writeln!(writer, "# fintrack transactions")
        .and_then(|_| writeln!(writer, "# Exported: {}", exported))
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, records)?;
    Ok(())
}
