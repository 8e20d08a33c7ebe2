use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashApp {
    pub state: AppState,
}

impl SalesDashApp {
    /// Build the app, loading the configured CSV when it exists.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::default();
        let data_path = config.data_path();
        if data_path.exists() {
            state.load_file(&data_path);
        } else {
            log::warn!(
                "startup data file {} not found; use File → Open…",
                data_path.display()
            );
        }
        Self { state }
    }
}

impl eframe::App for SalesDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::central_panel(ui, &mut self.state);
        });
    }
}
