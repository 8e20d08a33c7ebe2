/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  supermarket_sales.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → SalesDataset, derive `hour` from `Time`
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset │  Vec<Record>, unique-value index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  per-column allow-lists → filtered view
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  KPI summary + grouped sums for the charts
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod aggregate;
