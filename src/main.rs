mod app;
mod config;
mod data;
mod state;
mod ui;

use app::BrowserApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let datasets = config::builtin_datasets()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "The Federal Circuit Database Project",
        options,
        Box::new(move |_cc| Ok(Box::new(BrowserApp::new(datasets)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
