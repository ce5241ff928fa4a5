//! FitTrack - personal fitness tracker
//!
//! Main entry point for the application.

use anyhow::Context;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fittrack::storage::config::{get_data_dir, load_config};
use fittrack::storage::{AppConfig, Persister, SqliteStore};
use fittrack::LocalIdentityProvider;

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FitTrack v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().unwrap_or_else(|e| {
        tracing::warn!("Using default configuration: {}", e);
        AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        }
    });

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;

    let db_path = config.database_path();
    tracing::info!("Using database at {}", db_path.display());

    let store = SqliteStore::open(&db_path).context("Failed to open data store")?;
    let persister = Persister::with_timeout(store, config.storage.write_timeout())
        .context("Failed to start storage worker")?;
    let auth = LocalIdentityProvider::open(&db_path, &config.auth)
        .context("Failed to open account store")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 560.0])
            .with_title("FitTrack"),
        ..Default::default()
    };

    eframe::run_native(
        "FitTrack",
        options,
        Box::new(move |cc| Ok(Box::new(app::FitTrackApp::new(cc, config, persister, auth)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {e}"))
}
