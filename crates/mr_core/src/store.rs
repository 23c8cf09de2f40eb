//! CSV persistence for tables and reconciliation artifacts.
//!
//! Tables round-trip byte-for-byte at the cell level: values are read and
//! written as raw text, so cells no engine touched come back exactly as
//! they went in (including upstream float formatting like "6.0").

use crate::audit::AuditRecord;
use crate::table::MatchTable;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a match table from CSV. The first row is the header.
pub fn load_table(path: &Path) -> Result<MatchTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open table: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read header row: {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = MatchTable::new(headers)
        .with_context(|| format!("Bad header row: {}", path.display()))?;

    for (i, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read row {} of {}", i + 2, path.display()))?;
        table
            .push_row(record.iter().map(str::to_string).collect())
            .with_context(|| format!("Bad row {} of {}", i + 2, path.display()))?;
    }
    Ok(table)
}

/// Write a match table as CSV, header first.
pub fn save_table(path: &Path, table: &MatchTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output: {}", path.display()))?;

    writer
        .write_record(table.headers())
        .with_context(|| format!("Failed to write header: {}", path.display()))?;
    for row in 0..table.n_rows() {
        writer
            .write_record(table.row(row))
            .with_context(|| format!("Failed to write row {} to {}", row + 2, path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush output: {}", path.display()))?;
    Ok(())
}

/// Load one reconciliation artifact (a shard or a combined file).
pub fn load_audit(path: &Path) -> Result<Vec<AuditRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open audit file: {}", path.display()))?;

    let mut records = Vec::new();
    for (i, record) in reader.deserialize::<AuditRecord>().enumerate() {
        let record = record
            .with_context(|| format!("Bad audit row {} in {}", i + 2, path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// Write a reconciliation artifact. Absent fields become empty cells.
pub fn save_audit(path: &Path, records: &[AuditRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create audit output: {}", path.display()))?;

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write audit row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush audit output: {}", path.display()))?;
    Ok(())
}
