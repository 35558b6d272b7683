use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Directory {} does not exist", .path.display())]
    InvalidPath { path: PathBuf },

    #[error(
        "The directory {} already exists. There is a risk to overwrite existing backup.",
        .path.display()
    )]
    AlreadyExists { path: PathBuf },

    // The dump tool may echo the connection string, so its output never ends up here.
    #[error("\"mongodump\" failed with an error")]
    DumpFailed,

    #[error("Failed to remove partial backup directory {}: {source}", .path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove outdated backup directory {}: {source}", .path.display())]
    PruneFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve backups folder path {raw}: {source}")]
    Resolve {
        raw: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Date arithmetic out of range: {0} days before today")]
    DateOutOfRange(u64),
}

pub type Result<T> = std::result::Result<T, BackupError>;
