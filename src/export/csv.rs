//! CSV and TSV writers

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};

use super::TransactionRecord;

/// Write records with a header row using the given field delimiter
pub fn write_records<W: Write>(
    writer: W,
    records: &[TransactionRecord],
    delimiter: u8,
) -> FinanceResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(super::REQUIRED_COLUMNS.iter().chain(["tags"].iter()))?;
    for record in records {
        csv_writer.serialize(record)?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinanceError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TransactionRecord {
        TransactionRecord {
            date: "2024-01-05".into(),
            kind: "Expense".into(),
            category: "Food".into(),
            amount: 12.5,
            description: "Lunch, with team".into(),
            tags: String::new(),
        }
    }

    #[test]
    fn test_tsv_uses_tabs() {
        let mut out = Vec::new();
        write_records(&mut out, &[record()], b'\t').unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "date\ttype\tcategory\tamount\tdescription\ttags\n\
             2024-01-05\tExpense\tFood\t12.5\tLunch, with team\t\n"
        );
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let mut out = Vec::new();
        write_records(&mut out, &[record()], b',').unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\"Lunch, with team\""));
    }
}
