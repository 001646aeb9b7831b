mod app;
mod ui;

use app::CsvLensApp;
use csv_lens::config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "CSV Lens – Viewer and Filter",
        options,
        Box::new(|_cc| Ok(Box::new(CsvLensApp::new(config)))),
    )
}
