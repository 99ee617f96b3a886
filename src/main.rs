//! paginate-demo
//!
//! Serves a router wrapped in the pagination middleware.
//! Reads configuration from TOML file (~/.config/axum-paginate/config.toml),
//! or from the path in `PAGINATE_CONFIG`.

use tracing::{error, info};

use axum_paginate::config::{default_config_path, AppConfig};
use axum_paginate::server::{init_tracing, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("PAGINATE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    run(&config).await?;
    info!("Server stopped");
    Ok(())
}
