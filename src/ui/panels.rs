use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Column;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one collapsible section per filterable
/// column with per-value checkboxes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Apply Filters");
    ui.separator();

    if state.source.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone the value index so we can mutate state inside the loop.
    let unique = state.dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in Column::CATEGORICAL {
                let Some(all_values) = unique.get(&col) else {
                    continue;
                };

                let n_selected = state.filters.get(&col).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", col.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .filters
                                .get(&col)
                                .is_some_and(|selected| selected.contains(val));

                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.source.is_some() {
            ui.label(format!(
                "{} transactions loaded, {} match the filters",
                state.dataset.len(),
                state.view.len()
            ));
        }

        for msg in &state.warnings {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}
