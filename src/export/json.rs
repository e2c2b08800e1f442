//! JSON writer

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};

use super::TransactionRecord;

/// Write records as a pretty-printed JSON array
pub fn write_records<W: Write>(mut writer: W, records: &[TransactionRecord]) -> FinanceResult<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))
}
