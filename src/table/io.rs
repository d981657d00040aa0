//! CSV reading and writing for tables.

use std::fs::File;
use std::path::Path;

use tracing::{debug, info, warn};

use super::{Record, Table};
use crate::error::{HarvestError, Result};

/// Read a CSV file with a header row into a table.
///
/// Every header becomes a field of every record, in header order.
/// Short rows are padded with empty strings.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers()?.clone();

    let mut table = Table::new();
    for row in reader.records() {
        let row = row?;
        if row.len() > headers.len() {
            warn!(
                "{}: row {} has {} cells but only {} headers; extra cells dropped",
                path.display(),
                table.len() + 1,
                row.len(),
                headers.len()
            );
        }
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header, row.get(idx).unwrap_or("")))
            .collect();
        table.push(record);
    }

    debug!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Read one side of a merge. An input without data rows has nothing to key
/// on and fails with [`HarvestError::EmptyInput`].
pub fn read_merge_input(path: &Path) -> Result<Table> {
    let table = read_table(path)?;
    if table.is_empty() {
        return Err(HarvestError::EmptyInput(path.to_path_buf()));
    }
    Ok(table)
}

/// Write a table as CSV with a header row.
///
/// Columns are the table's column union; a record missing a column is
/// written with the sentinel.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let columns = table.columns();
    if columns.is_empty() {
        return Err(HarvestError::EmptyMerge);
    }
    write_with_columns(table, &columns, path)
}

/// Write a table with an explicit column order (used when the field set is
/// fixed and the header must be present even for zero records).
pub fn write_table_with_columns(table: &Table, columns: &[String], path: &Path) -> Result<()> {
    write_with_columns(table, columns, path)
}

fn write_with_columns(table: &Table, columns: &[String], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns)?;
    for record in table.records() {
        writer.write_record(columns.iter().map(|c| record.get_or_sentinel(c)))?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
