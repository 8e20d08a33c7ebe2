use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Column, SalesDataset};

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column → set of allowed values.
///
/// A column that is absent, or whose set is empty, places no constraint on
/// the data. Empty-means-everything is a usability policy: deselecting every
/// value in a filter widget must not blank the whole dashboard.
pub type FilterSelection = BTreeMap<Column, BTreeSet<CellValue>>;

/// Initialise a [`FilterSelection`] with every value of every filterable
/// column selected.
pub fn init_selection(dataset: &SalesDataset) -> FilterSelection {
    dataset
        .unique_values
        .iter()
        .map(|(col, vals)| (*col, vals.clone()))
        .collect()
}

/// Return indices of records that pass all active constraints.
///
/// A record passes a column when:
/// * the column is not in `selection`, or its set is empty → no constraint
/// * the record's value for that column is in the selected set
///
/// Constraints on different columns combine with logical AND.
pub fn filtered_indices(dataset: &SalesDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.iter().all(|(col, selected)| {
                if selected.is_empty() {
                    return true;
                }
                match rec.cell(*col) {
                    Some(val) => selected.contains(&val),
                    // Numeric columns carry no categorical value to constrain.
                    None => true,
                }
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Apply `selection` to `dataset`, returning the matching rows as a new
/// dataset. The input is never mutated; an empty input passes through
/// unchanged.
pub fn apply(dataset: &SalesDataset, selection: &FilterSelection) -> SalesDataset {
    let kept: Vec<_> = filtered_indices(dataset, selection)
        .into_iter()
        .map(|i| dataset.records[i].clone())
        .collect();
    SalesDataset::from_records(kept)
}
