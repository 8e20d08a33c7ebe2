use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between the CSV file and a chart.
///
/// Loader failures (`NotFound`, `Load`, load-time `Schema`) leave the caller
/// with an empty dataset; aggregation failures (`ColumnMissing`, `Schema`)
/// only skip the affected chart.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {}", .path.display(), .message)]
    Load { path: PathBuf, message: String },

    #[error("column '{column}' {problem}")]
    Schema { column: String, problem: String },

    #[error("unknown column '{column}'")]
    ColumnMissing { column: String },
}

// ---------------------------------------------------------------------------
// Column – the fixed schema of a sales CSV
// ---------------------------------------------------------------------------

/// The columns the dashboard knows about, with their CSV header spellings.
///
/// `Hour` is never read from the file; the loader derives it from `Time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    City,
    CustomerType,
    Gender,
    ProductLine,
    Time,
    Total,
    Rating,
    Hour,
}

impl Column {
    /// Columns the filter panel constrains.
    pub const CATEGORICAL: [Column; 3] = [Column::City, Column::CustomerType, Column::Gender];

    /// Columns a bar chart can group by, in tab order.
    pub const GROUPABLE: [Column; 5] = [
        Column::ProductLine,
        Column::Hour,
        Column::Gender,
        Column::CustomerType,
        Column::City,
    ];

    const ALL: [Column; 8] = [
        Column::City,
        Column::CustomerType,
        Column::Gender,
        Column::ProductLine,
        Column::Time,
        Column::Total,
        Column::Rating,
        Column::Hour,
    ];

    /// Header spelling in the CSV (and the name the UI passes around).
    pub fn name(self) -> &'static str {
        match self {
            Column::City => "City",
            Column::CustomerType => "Customer_type",
            Column::Gender => "Gender",
            Column::ProductLine => "Product line",
            Column::Time => "Time",
            Column::Total => "Total",
            Column::Rating => "Rating",
            Column::Hour => "hour",
        }
    }

    /// Human label for headings and chart tabs.
    pub fn label(self) -> &'static str {
        match self {
            Column::City => "City",
            Column::CustomerType => "Customer Type",
            Column::Gender => "Gender",
            Column::ProductLine => "Product Line",
            Column::Time => "Time",
            Column::Total => "Total",
            Column::Rating => "Rating",
            Column::Hour => "Hour",
        }
    }

    /// Reverse of [`Column::name`]; `None` for anything outside the schema.
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

// ---------------------------------------------------------------------------
// CellValue – a categorical cell, usable as a filter/group key
// ---------------------------------------------------------------------------

/// A single categorical value. `Ord + Hash` so selections and group sums can
/// live in `BTreeSet` / `BTreeMap`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellValue {
    Text(String),
    Int(i64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Record – one sales transaction
// ---------------------------------------------------------------------------

/// One row of the sales CSV, typed at load time.
#[derive(Debug, Clone)]
pub struct Record {
    pub city: String,
    pub customer_type: String,
    pub gender: String,
    pub product_line: String,
    /// Time of day as read from the file ("HH:MM").
    pub time: String,
    pub total: f64,
    pub rating: f64,
    /// Hour of day derived from `time`; 0 when derivation failed.
    pub hour: u32,
}

impl Record {
    /// Categorical value of `column`, or `None` for the numeric columns.
    pub fn cell(&self, column: Column) -> Option<CellValue> {
        match column {
            Column::City => Some(CellValue::Text(self.city.clone())),
            Column::CustomerType => Some(CellValue::Text(self.customer_type.clone())),
            Column::Gender => Some(CellValue::Text(self.gender.clone())),
            Column::ProductLine => Some(CellValue::Text(self.product_line.clone())),
            Column::Time => Some(CellValue::Text(self.time.clone())),
            Column::Hour => Some(CellValue::Int(self.hour as i64)),
            Column::Total | Column::Rating => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with a pre-computed unique-value index for the
/// filterable columns. Loaded once and treated as read-only; filtering
/// produces a new derived dataset.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    /// All transactions (rows).
    pub records: Vec<Record>,
    /// For each categorical column the sorted set of distinct values.
    pub unique_values: BTreeMap<Column, BTreeSet<CellValue>>,
}

impl SalesDataset {
    /// Build the unique-value index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut unique_values: BTreeMap<Column, BTreeSet<CellValue>> = BTreeMap::new();

        for rec in &records {
            for col in Column::CATEGORICAL {
                if let Some(val) = rec.cell(col) {
                    unique_values.entry(col).or_default().insert(val);
                }
            }
        }
        SalesDataset {
            records,
            unique_values,
        }
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
