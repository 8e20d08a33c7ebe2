use eframe::egui;
use sales_dash::app::SalesDashApp;
use sales_dash::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SalesDashApp::new(&config)))),
    )
}
