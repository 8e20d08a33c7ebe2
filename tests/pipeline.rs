use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sales_dash::data::aggregate::{group_and_sum, summarize};
use sales_dash::data::filter::{self, FilterSelection};
use sales_dash::data::loader::load_csv;
use sales_dash::data::model::{CellValue, Column, DataError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn load_filter_aggregate_round_trip() {
    let loaded = load_csv(&fixture("sales_small.csv")).expect("fixture loads");
    assert!(loaded.warnings.is_empty());

    let ds = loaded.dataset;
    assert_eq!(ds.len(), 6);

    // Hour derivation: "09:15" parses to 9; the row with Time "bad" keeps
    // the sentinel hour 0 instead of being dropped.
    assert_eq!(ds.records[0].hour, 9);
    assert_eq!(ds.records[2].hour, 0);

    let summary = summarize(&ds);
    assert_eq!(summary.total, 115.0);
    assert_eq!(summary.average_rating, 7.4);
    assert_eq!(summary.average_transaction, 19.17);

    // Filter down to Yangon: two rows, total 30.
    let mut selection = FilterSelection::new();
    selection.insert(Column::City, BTreeSet::from([CellValue::from("Yangon")]));
    let view = filter::apply(&ds, &selection);
    assert_eq!(view.len(), 2);
    assert!(view.records.iter().all(|r| r.city == "Yangon"));
    assert_eq!(summarize(&view).total, 30.0);
    // The original is untouched.
    assert_eq!(ds.len(), 6);

    // Grouping by City sums per city, ascending by the sum.
    let series = group_and_sum(&ds, "City").unwrap();
    assert_eq!(
        series.points,
        vec![
            (CellValue::from("Mandalay"), 20.0),
            (CellValue::from("Yangon"), 30.0),
            (CellValue::from("Naypyitaw"), 65.0),
        ]
    );

    // Regrouping conserves the total, whatever the grouping column.
    for col in Column::GROUPABLE {
        let series = group_and_sum(&ds, col.name()).unwrap();
        let grouped_total: f64 = series.points.iter().map(|(_, v)| v).sum();
        assert_eq!(grouped_total, summary.total);
    }
}

#[test]
fn select_all_matches_no_selection() {
    let ds = load_csv(&fixture("sales_small.csv")).unwrap().dataset;

    let everything = filter::init_selection(&ds);
    assert_eq!(filter::apply(&ds, &everything).len(), ds.len());
    assert_eq!(filter::apply(&ds, &FilterSelection::new()).len(), ds.len());

    // An emptied-out widget places no constraint either.
    let mut none_selected = FilterSelection::new();
    none_selected.insert(Column::City, BTreeSet::new());
    assert_eq!(filter::apply(&ds, &none_selected).len(), ds.len());
}

#[test]
fn missing_time_column_warns_and_defaults_hour() {
    let loaded = load_csv(&fixture("sales_no_time.csv")).expect("loads without Time");
    assert_eq!(loaded.warnings.len(), 1);
    assert!(loaded.warnings[0].contains("Time"));
    assert!(loaded.dataset.records.iter().all(|r| r.hour == 0));
}

#[test]
fn non_numeric_total_fails_the_load() {
    let err = load_csv(&fixture("sales_bad_total.csv")).unwrap_err();
    match err {
        DataError::Schema { column, .. } => assert_eq!(column, "Total"),
        other => panic!("expected Schema error, got: {other}"),
    }
}

#[test]
fn missing_file_is_not_found() {
    let err = load_csv(&fixture("no_such_file.csv")).unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));
}

#[test]
fn unknown_grouping_column_leaves_metrics_unaffected() {
    let ds = load_csv(&fixture("sales_small.csv")).unwrap().dataset;
    let before = summarize(&ds);

    let err = group_and_sum(&ds, "NonexistentColumn").unwrap_err();
    assert!(matches!(err, DataError::ColumnMissing { .. }));
    assert_eq!(summarize(&ds), before);
}

#[test]
fn grouping_by_hour_buckets_the_sentinel_with_hour_zero() {
    let ds = load_csv(&fixture("sales_small.csv")).unwrap().dataset;
    let series = group_and_sum(&ds, "hour").unwrap();

    // The "bad" time row lands in the hour-0 bucket.
    assert!(series
        .points
        .iter()
        .any(|(k, v)| *k == CellValue::Int(0) && *v == 5.0));

    // Output is sorted ascending by summed total.
    let sums: Vec<f64> = series.points.iter().map(|(_, v)| *v).collect();
    assert!(sums.windows(2).all(|w| w[0] <= w[1]));
}
