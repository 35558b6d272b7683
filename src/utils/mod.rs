pub mod clock;
pub mod path_resolver;
pub mod redact;

use anyhow::{Context, Result};
use std::path::PathBuf;
use which::which;

/// Finds an executable by name in the system PATH.
pub fn find_executable(program: &str) -> Result<PathBuf> {
    which(program).with_context(|| {
        format!("{} executable not found in PATH. Please ensure the MongoDB database tools are installed and in your PATH.", program)
    })
}
