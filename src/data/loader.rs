use std::collections::BTreeMap;

use crate::config::{DatasetSource, TypeHint};

use super::error::{DataError, DataResult};
use super::model::{CellValue, ColumnMeta, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch a dataset's delimited source and parse it into a [`Table`].
///
/// The fetch is blocking; loading happens synchronously on first access
/// and the result is held by the table cache afterwards.
pub fn load_dataset(source: &DatasetSource) -> DataResult<Table> {
    let body = fetch_text(&source.url)?;
    parse_delimited(&body, source.delimiter as u8, &source.type_hints)
}

fn fetch_text(url: &str) -> DataResult<String> {
    let fetch_err = |source| DataError::Fetch {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?;
    response.text().map_err(fetch_err)
}

// ---------------------------------------------------------------------------
// Delimited-text parser
// ---------------------------------------------------------------------------

/// Parse delimited text (comma, tab, ...) with a header row into a table.
///
/// Column dtypes come from `hints` for known columns and are inferred for
/// the rest: all-integer, else all-float, else all-boolean, else text.
/// Empty cells become [`CellValue::Null`]; short rows are padded with nulls.
pub fn parse_delimited(
    text: &str,
    delimiter: u8,
    hints: &BTreeMap<String, TypeHint>,
) -> DataResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let name = h.trim();
            if name.is_empty() {
                // Unnamed header cells still need addressable columns.
                format!("Unnamed: {i}")
            } else {
                name.to_string()
            }
        })
        .collect();
    if headers.is_empty() {
        return Err(DataError::EmptyFile);
    }
    if reader.headers()?.iter().all(|h| h.trim().is_empty()) {
        return Err(DataError::NoColumns);
    }

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }

    let dtypes: Vec<ColumnDtype> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| match hints.get(name) {
            Some(TypeHint::Text) => ColumnDtype::Text,
            Some(TypeHint::Integer) => ColumnDtype::Integer,
            Some(TypeHint::Float) => ColumnDtype::Float,
            Some(TypeHint::Categorical) => ColumnDtype::Text,
            None => infer_column_dtype(&records, i),
        })
        .collect();

    let columns: Vec<ColumnMeta> = headers
        .iter()
        .map(|name| ColumnMeta {
            name: name.clone(),
            categorical: matches!(hints.get(name), Some(TypeHint::Categorical)),
        })
        .collect();

    let rows: Vec<Vec<CellValue>> = records
        .iter()
        .map(|record| {
            (0..headers.len())
                .map(|i| make_cell(record.get(i).unwrap_or("").trim(), dtypes[i]))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Per-column dtype inference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnDtype {
    Text,
    Integer,
    Float,
    Bool,
}

/// Decide a column's dtype by scanning all of its non-empty values.
///
/// Dates are deliberately not detected here: temporal coercion is a
/// filter-time concern and stays best-effort there.
fn infer_column_dtype(records: &[csv::StringRecord], col_idx: usize) -> ColumnDtype {
    let mut saw_value = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for record in records {
        let cell = record.get(col_idx).unwrap_or("").trim();
        if cell.is_empty() {
            continue;
        }
        saw_value = true;
        all_int = all_int && cell.parse::<i64>().is_ok();
        all_float = all_float && cell.parse::<f64>().is_ok();
        all_bool = all_bool && matches!(cell, "true" | "false");
        if !all_int && !all_float && !all_bool {
            return ColumnDtype::Text;
        }
    }

    if !saw_value {
        return ColumnDtype::Text;
    }
    if all_int {
        ColumnDtype::Integer
    } else if all_float {
        ColumnDtype::Float
    } else if all_bool {
        ColumnDtype::Bool
    } else {
        ColumnDtype::Text
    }
}

/// Materialize one cell under the column's dtype. A value that fails its
/// hinted dtype stays text rather than erroring.
fn make_cell(raw: &str, dtype: ColumnDtype) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    match dtype {
        ColumnDtype::Text => CellValue::String(raw.to_string()),
        ColumnDtype::Integer => raw
            .parse::<i64>()
            .map(CellValue::Integer)
            .unwrap_or_else(|_| CellValue::String(raw.to_string())),
        ColumnDtype::Float => raw
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or_else(|_| CellValue::String(raw.to_string())),
        ColumnDtype::Bool => match raw {
            "true" => CellValue::Bool(true),
            "false" => CellValue::Bool(false),
            other => CellValue::String(other.to_string()),
        },
    }
}
