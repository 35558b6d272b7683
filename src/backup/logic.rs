use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::backup::db_dump::{DUMP_PROGRAM, DumpInvocation, DumpRunner, MongoDump};
use crate::backup::folder::{backup_folder_name, days_before};
use crate::config::BackupConfig;
use crate::errors::{BackupError, Result};
use crate::utils::clock::{Clock, LocalClock};
use crate::utils::path_resolver::{FsPathResolver, PathResolver};
use crate::utils::redact::redact_connection_url;

/// Where a single backup cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Init,
    PathInvalid,
    RootValidated,
    TargetAlreadyExists,
    TargetCreated,
    DumpRunning,
    DumpSucceeded,
    Pruned,
    Done,
    DumpFailed,
    CleanedUp,
    Failed,
}

/// State owned by one call to `run`; nothing of it survives on the orchestrator.
#[derive(Debug)]
struct RunContext {
    today: NaiveDate,
    stage: RunStage,
}

impl RunContext {
    fn new(today: NaiveDate) -> Self {
        RunContext {
            today,
            stage: RunStage::Init,
        }
    }

    fn advance(&mut self, next: RunStage) {
        debug!("Backup stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

/// Runs one backup cycle: validate root, create today's folder, dump into it,
/// prune the folder that just left the retention window.
pub struct BackupOrchestrator {
    config: BackupConfig,
    dump_runner: Box<dyn DumpRunner>,
    clock: Box<dyn Clock>,
    path_resolver: Box<dyn PathResolver>,
}

impl BackupOrchestrator {
    pub fn new(config: BackupConfig) -> Self {
        let dump_runner = MongoDump::new(config.dump_timeout);
        BackupOrchestrator {
            config,
            dump_runner: Box::new(dump_runner),
            clock: Box::new(LocalClock),
            path_resolver: Box::new(FsPathResolver),
        }
    }

    pub fn with_dump_runner(mut self, dump_runner: impl DumpRunner + 'static) -> Self {
        self.dump_runner = Box::new(dump_runner);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_path_resolver(mut self, path_resolver: impl PathResolver + 'static) -> Self {
        self.path_resolver = Box::new(path_resolver);
        self
    }

    pub async fn run(&self) -> Result<()> {
        let mut run = RunContext::new(self.clock.today());
        info!(
            "🚀 Starting database backup of {} (keeping {} days)",
            redact_connection_url(&self.config.database_connection_url),
            self.config.retention_days
        );

        let result = self.run_cycle(&mut run).await;
        match &result {
            Ok(()) => info!("🎉 Backup completed successfully"),
            Err(e) => error!("❌ Backup failed at stage {:?}: {}", run.stage, e),
        }
        result
    }

    async fn run_cycle(&self, run: &mut RunContext) -> Result<()> {
        let root = self
            .resolve_root()
            .inspect_err(|_| run.advance(RunStage::PathInvalid))?;
        run.advance(RunStage::RootValidated);

        let target = root.join(backup_folder_name(run.today));
        self.create_target(&target)
            .await
            .inspect_err(|e| {
                if matches!(e, BackupError::AlreadyExists { .. }) {
                    run.advance(RunStage::TargetAlreadyExists);
                }
            })?;
        run.advance(RunStage::TargetCreated);

        run.advance(RunStage::DumpRunning);
        let invocation = DumpInvocation::new(&self.config.database_connection_url, &target);
        if let Err(e) = self.dump_runner.dump(&invocation).await {
            run.advance(RunStage::DumpFailed);
            error!("❌ {} failed: {:#}", DUMP_PROGRAM, e);
            self.remove_partial_backup(&target).await?;
            run.advance(RunStage::CleanedUp);
            run.advance(RunStage::Failed);
            return Err(BackupError::DumpFailed);
        }
        run.advance(RunStage::DumpSucceeded);
        info!("✓ Dump written to {}", target.display());

        self.prune_outdated(&root, run.today).await?;
        run.advance(RunStage::Pruned);
        run.advance(RunStage::Done);
        Ok(())
    }

    fn resolve_root(&self) -> Result<PathBuf> {
        let raw = &self.config.backups_folder_path;
        let resolved = self
            .path_resolver
            .resolve(raw)
            .map_err(|source| BackupError::Resolve {
                raw: raw.clone(),
                source,
            })?;

        if !resolved.is_dir() {
            return Err(BackupError::InvalidPath { path: resolved });
        }
        debug!("📂 Backups root: {}", resolved.display());
        Ok(resolved)
    }

    async fn create_target(&self, target: &Path) -> Result<()> {
        if target.exists() {
            return Err(BackupError::AlreadyExists {
                path: target.to_path_buf(),
            });
        }

        // Another process may have won the race since the check above.
        tokio::fs::create_dir(target).await.map_err(|source| {
            if source.kind() == ErrorKind::AlreadyExists {
                BackupError::AlreadyExists {
                    path: target.to_path_buf(),
                }
            } else {
                BackupError::Io {
                    path: target.to_path_buf(),
                    source,
                }
            }
        })?;
        info!("📂 Backup directory created at: {}", target.display());
        Ok(())
    }

    async fn remove_partial_backup(&self, target: &Path) -> Result<()> {
        match tokio::fs::remove_dir_all(target).await {
            Ok(()) => {
                info!("🧹 Removed partial backup {}", target.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BackupError::CleanupFailed {
                path: target.to_path_buf(),
                source,
            }),
        }
    }

    async fn prune_outdated(&self, root: &Path, today: NaiveDate) -> Result<()> {
        let retention_days = self.config.retention_days;
        if retention_days == 0 {
            warn!("⚠️ Retention is 0 days, skipping pruning so today's backup is kept");
            return Ok(());
        }

        let outdated = root.join(backup_folder_name(days_before(today, retention_days)?));
        if !outdated.exists() {
            debug!("No outdated backup at {}", outdated.display());
            return Ok(());
        }

        tokio::fs::remove_dir_all(&outdated)
            .await
            .map_err(|source| BackupError::PruneFailed {
                path: outdated.clone(),
                source,
            })?;
        info!("🗑 Removed outdated backup {}", outdated.display());
        Ok(())
    }
}
