#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use task_planner::app::PlannerApp;
use task_planner::config::{AppSettings, SettingsStore};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let store = SettingsStore::from_default_location();
    let loaded = store.load();

    let log_filter = loaded
        .as_ref()
        .map(|s| s.log_filter.clone())
        .unwrap_or_else(|_| AppSettings::default().log_filter);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let settings = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default settings");
        AppSettings::default()
    });
    tracing::info!(path = %store.path().display(), "starting task planner");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Task Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Task Planner",
        options,
        Box::new(|cc| Ok(Box::new(PlannerApp::new(cc, settings, store)?))),
    )
}
