mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use app::LaunchDashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::DashboardState;

fn main() {
    env_logger::init();
    std::process::exit(exit_status(run()));
}

/// Log a fatal error once and map the outcome to the process exit status.
fn exit_status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e:#}");
            1
        }
    }
}

fn run() -> Result<()> {
    let config = DashboardConfig::load_or_default(CONFIG_FILE)?;

    // Loaded once; a missing or malformed file stops startup here.
    let dataset = Arc::new(data::loader::load_csv(&config.data_path)?);
    let state = DashboardState::new(dataset, config.slider.clone());

    let window = &config.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([window.min_width, window.min_height]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashboardApp::new(state, title)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
