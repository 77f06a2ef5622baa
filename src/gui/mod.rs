pub mod app;
pub mod events;
pub mod flags;
pub mod service;
pub mod state;

use anyhow::{Result, anyhow};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::{Converter, CurrencyRateProvider};

pub const WINDOW_TITLE: &str = "Currency Converter";

/// Opens the converter window and blocks until it is closed.
/// Must be called with a tokio runtime entered; the service task is spawned on it.
pub fn run(config: &AppConfig, provider: Arc<dyn CurrencyRateProvider>) -> Result<()> {
    let state = state::AppState::new(&config.display);
    let converter = Converter::new(provider);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([480.0, 360.0]),
        centered: true,
        ..Default::default()
    };

    info!("Opening converter window");
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let (ui_tx, ui_rx) = mpsc::unbounded_channel();
            let (svc_tx, svc_rx) = mpsc::unbounded_channel();
            let ctx = cc.egui_ctx.clone();
            tokio::spawn(service::run(converter, ui_rx, svc_tx, move || {
                ctx.request_repaint()
            }));
            Ok(Box::new(app::App::new(state, ui_tx, svc_rx)))
        }),
    )
    .map_err(|e| anyhow!("Failed to run the converter window: {e}"))
}
