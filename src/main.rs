mod config;
mod game;
mod game_app;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;
use tracing::{error, info};

use crate::config::Config;
use crate::game::GameController;
use crate::game_app::GameApp;

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .init();

    // The AI timer is a tokio task; the UI thread stays inside the runtime.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    info!(
        ai_delay_ms = config.ai_delay_ms,
        seed = ?config.seed,
        "Starting Tic-Tac-Toe"
    );

    let controller = GameController::new(config.ai(), config.ai_delay());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tic-Tac-Toe")
            .with_inner_size([440.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(|_cc| Ok(Box::new(GameApp::new(controller)))),
    )
    .map_err(|e| {
        error!("UI failed: {}", e);
        anyhow!("failed to run the game window: {e}")
    })
}
