mod app;
mod color;
mod config;
mod data;
mod diagram;
mod error;
mod series;
mod state;
mod ui;

use std::path::Path;

use app::TpdvApp;
use config::DiagramConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Tables are read from the working directory before the window opens.
    let state = AppState::load(Path::new("."), DiagramConfig::default());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([500.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TPDV – Ternary Phase Diagram",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(TpdvApp::new(state)))
        }),
    )
}
