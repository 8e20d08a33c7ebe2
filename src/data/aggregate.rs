use std::collections::BTreeMap;

use super::model::{CellValue, Column, DataError, SalesDataset};

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// Headline metrics over a (possibly filtered) dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesSummary {
    /// Sum of `Total` over all rows.
    pub total: f64,
    /// Mean of `Rating`, rounded to 1 decimal place.
    pub average_rating: f64,
    /// Mean of `Total`, rounded to 2 decimal places.
    pub average_transaction: f64,
}

/// Compute the KPI summary. An empty dataset yields all zeroes instead of a
/// division by zero.
pub fn summarize(dataset: &SalesDataset) -> SalesSummary {
    if dataset.is_empty() {
        return SalesSummary::default();
    }
    let n = dataset.len() as f64;
    let total: f64 = dataset.records.iter().map(|r| r.total).sum();
    let rating_sum: f64 = dataset.records.iter().map(|r| r.rating).sum();

    SalesSummary {
        total,
        average_rating: round_to(rating_sum / n, 1),
        average_transaction: round_to(total / n, 2),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Group-and-sum for bar charts
// ---------------------------------------------------------------------------

/// Summed `Total` per distinct value of a grouping column, sorted ascending
/// by the sum. Ties keep the key order of the grouping values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSeries {
    pub column: Column,
    pub points: Vec<(CellValue, f64)>,
}

/// Group `dataset` by the column named `column_name` and sum `Total` within
/// each group.
///
/// The name must resolve to a categorical schema column: an unknown name is
/// a `ColumnMissing` error, a numeric column a `Schema` error. Both are
/// recoverable; the caller skips the affected chart and carries on. An empty
/// dataset yields an empty series.
pub fn group_and_sum(dataset: &SalesDataset, column_name: &str) -> Result<GroupedSeries, DataError> {
    let Some(column) = Column::from_name(column_name) else {
        return Err(DataError::ColumnMissing {
            column: column_name.to_string(),
        });
    };

    let mut sums: BTreeMap<CellValue, f64> = BTreeMap::new();
    for rec in &dataset.records {
        let Some(key) = rec.cell(column) else {
            return Err(DataError::Schema {
                column: column.name().to_string(),
                problem: "is numeric and cannot be used as a grouping key".to_string(),
            });
        };
        *sums.entry(key).or_insert(0.0) += rec.total;
    }

    let mut points: Vec<(CellValue, f64)> = sums.into_iter().collect();
    points.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(GroupedSeries { column, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(city: &str, total: f64, rating: f64, hour: u32) -> Record {
        Record {
            city: city.into(),
            customer_type: "Member".into(),
            gender: "Female".into(),
            product_line: "Sports and travel".into(),
            time: format!("{hour:02}:30"),
            total,
            rating,
            hour,
        }
    }

    #[test]
    fn summary_of_empty_dataset_is_all_zero() {
        let summary = summarize(&SalesDataset::default());
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn summary_rounds_the_means() {
        let ds = SalesDataset::from_records(vec![
            rec("Yangon", 10.0, 7.05, 9),
            rec("Yangon", 20.0, 8.0, 9),
            rec("Mandalay", 5.0, 9.0, 14),
        ]);
        let summary = summarize(&ds);

        assert_eq!(summary.total, 35.0);
        assert_eq!(summary.average_rating, 8.0); // mean 8.0166...
        assert_eq!(summary.average_transaction, 11.67); // mean 11.6666...
    }

    #[test]
    fn groups_are_sorted_ascending_by_sum() {
        let ds = SalesDataset::from_records(vec![
            rec("A", 10.0, 7.0, 9),
            rec("A", 20.0, 7.0, 9),
            rec("B", 5.0, 7.0, 14),
        ]);
        let series = group_and_sum(&ds, "City").unwrap();

        assert_eq!(
            series.points,
            vec![
                (CellValue::from("B"), 5.0),
                (CellValue::from("A"), 30.0),
            ]
        );
    }

    #[test]
    fn grouping_by_hour_uses_the_derived_field() {
        let ds = SalesDataset::from_records(vec![
            rec("A", 10.0, 7.0, 9),
            rec("B", 7.0, 7.0, 14),
            rec("C", 2.0, 7.0, 9),
        ]);
        let series = group_and_sum(&ds, "hour").unwrap();

        assert_eq!(
            series.points,
            vec![(CellValue::Int(14), 7.0), (CellValue::Int(9), 12.0)]
        );
    }

    #[test]
    fn group_sums_conserve_the_summary_total() {
        let ds = SalesDataset::from_records(vec![
            rec("A", 12.5, 7.0, 9),
            rec("B", 30.25, 7.0, 10),
            rec("C", 7.25, 7.0, 11),
            rec("A", 4.0, 7.0, 12),
        ]);
        for col in Column::GROUPABLE {
            let series = group_and_sum(&ds, col.name()).unwrap();
            let grouped_total: f64 = series.points.iter().map(|(_, v)| v).sum();
            assert_eq!(grouped_total, summarize(&ds).total);
        }
    }

    #[test]
    fn unknown_column_is_reported_not_fatal() {
        let ds = SalesDataset::from_records(vec![rec("A", 10.0, 7.0, 9)]);
        let err = group_and_sum(&ds, "NonexistentColumn").unwrap_err();
        assert!(matches!(err, DataError::ColumnMissing { .. }));
        // The dataset and its metrics are unaffected.
        assert_eq!(summarize(&ds).total, 10.0);
    }

    #[test]
    fn numeric_column_is_a_schema_error() {
        let ds = SalesDataset::from_records(vec![rec("A", 10.0, 7.0, 9)]);
        let err = group_and_sum(&ds, "Total").unwrap_err();
        assert!(matches!(err, DataError::Schema { .. }));
    }

    #[test]
    fn empty_dataset_yields_empty_series() {
        let series = group_and_sum(&SalesDataset::default(), "City").unwrap();
        assert!(series.points.is_empty());
    }
}
