pub(crate) mod db_dump;
pub(crate) mod folder;
mod logic;

pub use logic::BackupOrchestrator;

use anyhow::Result;
use crate::config::BackupConfig;

/// Public entry point for the backup process.
/// Runs exactly one backup cycle with the production dump runner, clock and path resolver.
pub async fn run_backup_flow(backup_config: BackupConfig) -> Result<()> {
    BackupOrchestrator::new(backup_config).run().await?;
    Ok(())
}
