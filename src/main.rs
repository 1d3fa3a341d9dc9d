mod app;
mod config;
mod db;
mod inference;
mod models;
mod schema;
mod sql;
mod ui;

use app::SqlScribeApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("SQL Scribe - Natural Language to SQL"),
        ..Default::default()
    };

    eframe::run_native(
        "SQL Scribe",
        options,
        Box::new(|cc| Box::new(SqlScribeApp::new(cc))),
    )
}
