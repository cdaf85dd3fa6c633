//! CSV snapshot → [`RawTable`].
//!
//! Cells stay text; typing and correction belong to the preprocessor.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use rebalance_inventory::RawTable;

/// Load a raw table from any CSV reader.
///
/// Empty cells become missing values. Short rows are padded with missing
/// cells so every row lines up with the header.
pub fn load_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("failed to read CSV header")?
        .clone();
    let width = headers.len();
    let mut table = RawTable::new(headers.iter());

    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at line {}", line_num + 2))?;
        let cells = (0..width).map(|i| record.get(i).filter(|c| !c.is_empty()));
        table.push_row(cells);
    }

    debug!(columns = width, rows = table.len(), "snapshot loaded");
    Ok(table)
}

/// Load a raw table from a CSV file path.
pub fn load_table_file(path: &Path) -> Result<RawTable> {
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    load_table(file).with_context(|| format!("failed to load '{}'", path.display()))
}
