//! CSV company imports.
//!
//! Rows are keyed by header (column order varies between exports), and a
//! row that fails validation is collected as a row error rather than
//! aborting the batch.

use std::collections::HashMap;

use tracing::warn;

use crate::record::CompanyRecord;

/// One row that could not become a record.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RowError {
    /// 1-based data row number (header excluded).
    pub row: usize,
    /// Company name if the row carried one, for the import summary.
    pub name: String,
    pub message: String,
}

/// Outcome of parsing a CSV batch: valid records plus per-row errors.
#[derive(Debug, Default)]
pub struct CsvBatch {
    pub records: Vec<CompanyRecord>,
    pub errors: Vec<RowError>,
}

/// Parse CSV text with a header row into company records.
pub fn parse_csv(data: &str) -> CsvBatch {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut batch = CsvBatch::default();
    for (index, result) in reader.deserialize::<HashMap<String, String>>().enumerate() {
        let row = index + 1;
        match result {
            Ok(cells) => match CompanyRecord::from_row(&cells) {
                Ok(record) => batch.records.push(record),
                Err(err) => {
                    let name = cells.get("company_name").cloned().unwrap_or_default();
                    warn!("skipping CSV row {} ({}): {}", row, name, err);
                    batch.errors.push(RowError {
                        row,
                        name,
                        message: err.to_string(),
                    });
                }
            },
            Err(err) => {
                warn!("skipping unreadable CSV row {}: {}", row, err);
                batch.errors.push(RowError {
                    row,
                    name: String::new(),
                    message: err.to_string(),
                });
            }
        }
    }

    batch
}

// ── Tests ───────────────────────────────────────────────────────────
