use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::CategoryColors;
use crate::data::aggregate::{group_and_sum, GroupedSeries, SalesSummary};
use crate::data::model::Column;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel: KPI row + grouped bar charts
// ---------------------------------------------------------------------------

/// Render the central panel: KPI metrics, chart tabs, and the active chart.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.source.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a sales CSV to begin  (File → Open…)");
        });
        return;
    }

    ui.heading("Overview of Sales Performance");
    ui.separator();

    kpi_row(ui, &state.summary);
    if state.view.is_empty() {
        ui.label(
            RichText::new("No data available for the selected filters.").color(Color32::YELLOW),
        );
    }
    ui.separator();

    // ---- Chart tabs ----
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for col in Column::GROUPABLE {
            if ui
                .selectable_label(state.selected_chart == col, col.label())
                .clicked()
            {
                state.selected_chart = col;
            }
        }
    });

    ui.strong(format!("Sales by {}", state.selected_chart.label()));

    // A failed grouping only skips this chart; KPIs and filters stay live.
    match group_and_sum(&state.view, state.selected_chart.name()) {
        Ok(series) => bar_chart(ui, &series),
        Err(e) => {
            log::error!("cannot chart by {}: {e}", state.selected_chart.name());
            ui.label(RichText::new(format!("Cannot draw this chart: {e}")).color(Color32::RED));
        }
    }
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, summary: &SalesSummary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(
            &mut cols[0],
            "Total Sales",
            format!("US $ {}", thousands(summary.total as i64)),
        );
        metric(
            &mut cols[1],
            "Average Rating",
            format!("{:.1}", summary.average_rating),
        );
        metric(
            &mut cols[2],
            "Avg Sales/Transaction",
            format!("US $ {:.2}", summary.average_transaction),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(20.0).strong());
    });
}

/// Thousands-separated display of the summed total (truncated to an integer
/// at the display boundary only).
fn thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, series: &GroupedSeries) {
    if series.points.is_empty() {
        ui.label("No data to display after grouping.");
        return;
    }

    let colors = CategoryColors::new(series.points.iter().map(|(cat, _)| cat));

    let bars: Vec<Bar> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, (cat, sum))| {
            Bar::new(i as f64, *sum)
                .width(0.6)
                .name(cat.to_string())
                .fill(colors.color_for(cat))
        })
        .collect();

    let labels: Vec<String> = series.points.iter().map(|(cat, _)| cat.to_string()).collect();

    Plot::new("sales_chart")
        .y_axis_label("Total")
        .x_axis_formatter(move |mark, _range| {
            // Bars sit at integer positions; suppress in-between grid labels.
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels
                .get(idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
        assert_eq!(thousands(-54321), "-54,321");
    }
}
