use std::path::Path;

use chrono::{NaiveTime, Timelike};
use log::warn;

use super::model::{Column, DataError, Record, SalesDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Columns that must be present in the header for a load to succeed.
const REQUIRED: [Column; 6] = [
    Column::City,
    Column::CustomerType,
    Column::Gender,
    Column::ProductLine,
    Column::Total,
    Column::Rating,
];

/// A successfully loaded dataset plus any non-fatal warnings (currently only
/// "Time column absent").
#[derive(Debug, Default)]
pub struct LoadedData {
    pub dataset: SalesDataset,
    pub warnings: Vec<String>,
}

/// Load a sales CSV from `path`.
///
/// The header must contain every column in [`REQUIRED`]; a missing one is a
/// `Schema` error, as is a non-numeric `Total` or `Rating` cell. The `Time`
/// column is optional: when present, each value is parsed as "HH:MM" and the
/// hour extracted (unparsable values fall back to hour 0 without dropping the
/// row); when absent, every row gets hour 0 and a warning is returned.
///
/// Any error means no dataset: the caller never sees partially-parsed rows.
pub fn load_csv(path: &Path) -> Result<LoadedData, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let read_err = |message: String| DataError::Load {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| read_err(e.to_string()))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| read_err(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |col: Column| headers.iter().position(|h| h == col.name());

    for col in REQUIRED {
        if position(col).is_none() {
            return Err(DataError::Schema {
                column: col.name().to_string(),
                problem: "is missing from the CSV header".to_string(),
            });
        }
    }
    let city_idx = position(Column::City).unwrap();
    let customer_idx = position(Column::CustomerType).unwrap();
    let gender_idx = position(Column::Gender).unwrap();
    let product_idx = position(Column::ProductLine).unwrap();
    let total_idx = position(Column::Total).unwrap();
    let rating_idx = position(Column::Rating).unwrap();

    let time_idx = position(Column::Time);
    let mut warnings = Vec::new();
    if time_idx.is_none() {
        let msg = "column 'Time' not found; hour set to 0 for every row".to_string();
        warn!("{msg}");
        warnings.push(msg);
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| read_err(format!("row {row_no}: {e}")))?;

        let text = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
        let time = time_idx.map(|i| text(i)).unwrap_or_default();
        let hour = time_idx.map(|_| parse_hour(&time)).unwrap_or(0);

        records.push(Record {
            city: text(city_idx),
            customer_type: text(customer_idx),
            gender: text(gender_idx),
            product_line: text(product_idx),
            time,
            total: numeric_cell(&row, total_idx, Column::Total, row_no)?,
            rating: numeric_cell(&row, rating_idx, Column::Rating, row_no)?,
            hour,
        });
    }

    Ok(LoadedData {
        dataset: SalesDataset::from_records(records),
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Extract the hour from an "HH:MM" time-of-day string.
///
/// One bad value must not invalidate the whole file, so parse failures map
/// to the sentinel hour 0 and the row is kept.
pub fn parse_hour(s: &str) -> u32 {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map(|t| t.hour())
        .unwrap_or(0)
}

fn numeric_cell(
    row: &csv::StringRecord,
    idx: usize,
    column: Column,
    row_no: usize,
) -> Result<f64, DataError> {
    let raw = row.get(idx).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| DataError::Schema {
        column: column.name().to_string(),
        problem: format!("row {row_no}: '{raw}' is not a number"),
    })
}
