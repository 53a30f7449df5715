//! Entry point for the good-read service.
//!
//! Responsibilities here are kept small:
//! - Parse command-line arguments (an optional config path).
//! - Load and validate configuration from `conf/config.toml`.
//! - Build the EPUB library and extractor and start the HTTP server.

mod server;

use crate::server::AppState;
use anyhow::{Context, Result};
use good_read_core::config::{DEFAULT_CONFIG_PATH, load_config};
use good_read_core::{ChunkLimit, EpubLibrary, Extractor};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

#[actix_web::main]
async fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle).await {
        error!("{err:?}");
        std::process::exit(1);
    }
}

async fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config_path = parse_args();
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if env::var_os("RUST_LOG").is_none() {
        set_log_level(reload_handle, config.log_level.as_filter_str());
    }

    let extractor = Extractor::from_config(&config).context("Invalid extraction limits")?;
    let library = EpubLibrary::new(config.books_dir.clone());
    if !library.root().is_dir() {
        warn!(
            books_dir = %library.root().display(),
            "Library directory does not exist; every book will be reported missing"
        );
    }

    info!(
        config = %config_path.display(),
        addr = %config.bind_addr(),
        books_dir = %library.root().display(),
        chunk_limit = %extractor.chunk_limit(),
        probe_limit = ?extractor.probe_limit().map(ChunkLimit::get),
        level = %config.log_level,
        "Starting good-read"
    );

    let state = AppState::new(Arc::new(library), extractor);
    server::run(state, &config.bind_addr())
        .await
        .with_context(|| format!("HTTP server on {} failed", config.bind_addr()))?;
    info!("Server stopped");
    Ok(())
}

fn parse_args() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to apply log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
