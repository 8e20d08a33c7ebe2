use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::data::aggregate::{summarize, SalesSummary};
use crate::data::filter::{self, FilterSelection};
use crate::data::loader::{self, LoadedData};
use crate::data::model::{CellValue, Column, SalesDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `dataset` is loaded once and never mutated; `view` is the derived filtered
/// copy the aggregators run on, recomputed whenever the selection changes.
pub struct AppState {
    /// Loaded dataset (empty until a file loads successfully).
    pub dataset: SalesDataset,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Per-column filter selections.
    pub filters: FilterSelection,

    /// Rows passing the current filters.
    pub view: SalesDataset,

    /// KPI summary of `view` (cached).
    pub summary: SalesSummary,

    /// Grouping column of the currently selected chart tab.
    pub selected_chart: Column,

    /// Error message shown in the top bar.
    pub status_message: Option<String>,

    /// Non-fatal warnings from the last load.
    pub warnings: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: SalesDataset::default(),
            source: None,
            filters: FilterSelection::default(),
            view: SalesDataset::default(),
            summary: SalesSummary::default(),
            selected_chart: Column::ProductLine,
            status_message: None,
            warnings: Vec::new(),
        }
    }
}

impl AppState {
    /// Load `path` and replace the current dataset.
    ///
    /// On failure the state holds an explicitly empty dataset and the error
    /// text; the UI keeps running.
    pub fn load_file(&mut self, path: &Path) {
        match loader::load_csv(path) {
            Ok(loaded) => {
                log::info!(
                    "loaded {} transactions from {}",
                    loaded.dataset.len(),
                    path.display()
                );
                self.set_dataset(loaded, path.to_path_buf());
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.dataset = SalesDataset::default();
                self.source = None;
                self.filters = FilterSelection::default();
                self.warnings.clear();
                self.status_message = Some(format!("Error: {e}"));
                self.refilter();
            }
        }
    }

    /// Ingest a newly loaded dataset and reset filters to select-all.
    pub fn set_dataset(&mut self, loaded: LoadedData, source: PathBuf) {
        let LoadedData { dataset, warnings } = loaded;
        self.filters = filter::init_selection(&dataset);
        self.dataset = dataset;
        self.source = Some(source);
        self.warnings = warnings;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view and its summary after a filter change.
    pub fn refilter(&mut self) {
        self.view = filter::apply(&self.dataset, &self.filters);
        self.summary = summarize(&self.view);
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: Column, value: &CellValue) {
        let selected = self.filters.entry(column).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: Column) {
        if let Some(all_vals) = self.dataset.unique_values.get(&column) {
            let all_vals = all_vals.clone();
            self.filters.insert(column, all_vals);
            self.refilter();
        }
    }

    /// Deselect all values in a column. Note this shows everything, not
    /// nothing: an empty selection places no constraint.
    pub fn select_none(&mut self, column: Column) {
        self.filters.insert(column, BTreeSet::new());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> LoadedData {
        let records = vec![
            Record {
                city: "Yangon".into(),
                customer_type: "Member".into(),
                gender: "Female".into(),
                product_line: "Food and beverages".into(),
                time: "13:08".into(),
                total: 30.0,
                rating: 8.0,
                hour: 13,
            },
            Record {
                city: "Mandalay".into(),
                customer_type: "Normal".into(),
                gender: "Male".into(),
                product_line: "Health and beauty".into(),
                time: "10:29".into(),
                total: 10.0,
                rating: 6.0,
                hour: 10,
            },
        ];
        LoadedData {
            dataset: SalesDataset::from_records(records),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn toggling_a_value_updates_the_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), PathBuf::from("test.csv"));
        assert_eq!(state.view.len(), 2);

        // Deselect "Mandalay": only the Yangon row remains.
        state.toggle_filter_value(Column::City, &CellValue::from("Mandalay"));
        assert_eq!(state.view.len(), 1);
        assert_eq!(state.summary.total, 30.0);

        // Toggling it back restores the full view.
        state.toggle_filter_value(Column::City, &CellValue::from("Mandalay"));
        assert_eq!(state.view.len(), 2);
        assert_eq!(state.summary.total, 40.0);
    }

    #[test]
    fn select_none_shows_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), PathBuf::from("test.csv"));

        state.select_none(Column::City);
        assert_eq!(state.view.len(), 2);

        state.select_all(Column::City);
        assert_eq!(state.view.len(), 2);
    }

    #[test]
    fn failed_load_leaves_an_empty_dataset_and_a_message() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), PathBuf::from("test.csv"));

        state.load_file(Path::new("no/such/file.csv"));
        assert!(state.dataset.is_empty());
        assert!(state.view.is_empty());
        assert_eq!(state.summary, SalesSummary::default());
        assert!(state.status_message.as_deref().unwrap().contains("not found"));
    }
}
