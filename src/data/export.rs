use anyhow::{Context, Result};

use super::model::Table;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Encode a table as comma-separated UTF-8 bytes: header row of column
/// names, then one record per row, no index column. Null cells become
/// empty fields.
pub fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    if table.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.column_names())
        .context("writing CSV header")?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .context("writing CSV row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV output: {}", e.error()))
}
