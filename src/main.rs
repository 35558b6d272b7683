//! Database Backup Tool
//!
//! Runs one dated `mongodump` backup cycle with retention-based pruning and exits.

// databasebackup/src/main.rs
mod backup;
mod config;
mod errors;
mod utils;

use anyhow::{Context, Result};
use config::{RawJsonConfig, load_backup_config_from_json};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.json";
const ENV_CONFIG_PATH: &str = "BACKUP_CONFIG_PATH";

/// Main entry point for the backup tool
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run_app().await {
        Ok(_) => {
            tracing::info!("✅ Operation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_app() -> Result<()> {
    // Config path: first CLI argument, then BACKUP_CONFIG_PATH, then ./config.json.
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var(ENV_CONFIG_PATH).ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let raw_config = RawJsonConfig::load_optional(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?
        .apply_env_overrides(|key| env::var(key).ok())
        .context("Invalid configuration in environment variables")?;
    let backup_config = load_backup_config_from_json(&raw_config)
        .context("Failed to load backup configuration")?;
    tracing::debug!("Backup configuration: {:?}", backup_config);

    backup::run_backup_flow(backup_config)
        .await
        .context("Backup process failed")
}
