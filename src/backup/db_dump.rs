// databasebackup/src/backup/db_dump.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::utils::find_executable;
use crate::utils::redact::redact_connection_url;

pub const DUMP_PROGRAM: &str = "mongodump";

/// One call of the dump tool: `mongodump --uri <url> --out <dir>`.
#[derive(Clone, PartialEq, Eq)]
pub struct DumpInvocation {
    pub connection_url: String,
    pub out_dir: PathBuf,
}

impl DumpInvocation {
    pub fn new(connection_url: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        DumpInvocation {
            connection_url: connection_url.into(),
            out_dir: out_dir.into(),
        }
    }

    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from("--uri"),
            OsString::from(&self.connection_url),
            OsString::from("--out"),
            self.out_dir.clone().into_os_string(),
        ]
    }
}

impl fmt::Debug for DumpInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DumpInvocation")
            .field("connection_url", &redact_connection_url(&self.connection_url))
            .field("out_dir", &self.out_dir)
            .finish()
    }
}

#[async_trait]
pub trait DumpRunner: Send + Sync {
    /// Runs the dump to completion. Errors must not carry the tool's own output.
    async fn dump(&self, invocation: &DumpInvocation) -> Result<()>;
}

/// Shells out to the `mongodump` binary found on PATH.
#[derive(Debug, Clone)]
pub struct MongoDump {
    program: String,
    timeout: Option<Duration>,
}

impl MongoDump {
    pub fn new(timeout: Option<Duration>) -> Self {
        MongoDump {
            program: DUMP_PROGRAM.to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    fn with_program(program: &str, timeout: Option<Duration>) -> Self {
        MongoDump {
            program: program.to_string(),
            timeout,
        }
    }
}

impl Default for MongoDump {
    fn default() -> Self {
        MongoDump::new(None)
    }
}

#[async_trait]
impl DumpRunner for MongoDump {
    async fn dump(&self, invocation: &DumpInvocation) -> Result<()> {
        let program_path = find_executable(&self.program)?;
        tracing::debug!("Found {} executable at: {}", self.program, program_path.display());

        let mut command = Command::new(&program_path);
        command
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let pending = command.output();
        let output = match self.timeout {
            Some(limit) => timeout(limit, pending).await.map_err(|_| {
                anyhow::anyhow!(
                    "{} did not finish within {} seconds and was killed",
                    self.program,
                    limit.as_secs()
                )
            })?,
            None => pending.await,
        }
        .with_context(|| format!("Failed to execute {}", program_path.display()))?;

        if !output.status.success() {
            // stderr may echo the connection string, so only its size is reported.
            tracing::debug!(
                stderr_bytes = output.stderr.len(),
                "{} produced diagnostics",
                self.program
            );
            anyhow::bail!("{} exited with status: {}", self.program, output.status);
        }

        Ok(())
    }
}
