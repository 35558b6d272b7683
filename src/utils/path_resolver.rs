use std::io;
use std::path::PathBuf;

/// Turns a user-supplied, possibly relative path into an absolute one.
///
/// Implementations only resolve; checking that the path exists is left to the caller
/// so the error can name the absolute path that was checked.
pub trait PathResolver: Send + Sync {
    fn resolve(&self, raw: &str) -> io::Result<PathBuf>;
}

/// Resolves relative paths against the current working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPathResolver;

impl PathResolver for FsPathResolver {
    fn resolve(&self, raw: &str) -> io::Result<PathBuf> {
        std::path::absolute(raw)
    }
}
