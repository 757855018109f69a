//! Error types for the gitflux installer
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`
//! and owns exit-code policy; library code only returns `Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for installer operations
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Main error type for installer operations
#[derive(Error, Debug)]
pub enum InstallerError {
    /// Host OS or CPU identifier outside the supported set
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedHost { os: String, arch: String },

    /// Supported host with no cross-compilation target
    #[error("no build target for {platform}/{arch} - gitflux does not cross-compile for this pair")]
    UnsupportedBuildTarget {
        platform: &'static str,
        arch: &'static str,
    },

    /// Compiler executable could not be started
    #[error("build step failed: could not spawn '{program}': {source}")]
    CompilerSpawn {
        program: String,
        source: std::io::Error,
    },

    /// Compiler ran but exited non-zero
    #[error("build step failed: '{program}' exited with status {status}")]
    BuildFailed { program: String, status: i32 },

    /// Expected pre-built artifact variant is not on disk
    #[error("artifact not found: expected {path} - run 'gitflux-installer build' first")]
    MissingArtifact { path: PathBuf },

    /// Home directory could not be resolved
    #[error("could not determine user home directory")]
    NoHomeDir,

    /// PATH persistence step failed (setx, rc-file append)
    #[error("failed to persist PATH change: {message}")]
    PathPersist { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
