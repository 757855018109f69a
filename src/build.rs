//! External compiler invocation.
//!
//! Runs `go build` with `GOOS`/`GOARCH` set for the resolved target, writing
//! the artifact into the `bin/` directory. The child inherits stdout/stderr
//! and blocks the caller until it exits.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{InstallerError, InstallerResult};
use crate::platform::HostEnv;

/// Options for a single build run
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Output directory for the artifact (created if missing)
    pub bin_dir: PathBuf,
    /// Go entry point passed to the compiler
    pub source: PathBuf,
    /// Compiler executable
    pub go_bin: String,
}

impl BuildOptions {
    /// Options for `bin_dir`, with the compiler resolved from `GITFLUX_GO`
    /// (falling back to `go` on PATH) and the default `main.go` entry point.
    pub fn new(bin_dir: PathBuf, source: PathBuf) -> Self {
        let go_bin = std::env::var("GITFLUX_GO").unwrap_or_else(|_| "go".to_string());
        Self {
            bin_dir,
            source,
            go_bin,
        }
    }
}

/// Cross-compile gitflux for the host described by `env`.
///
/// Returns the path of the produced artifact. Unsupported targets and
/// compiler failures are explicit errors; nothing is left half-built on the
/// happy path.
pub fn run_build(env: &HostEnv, opts: &BuildOptions) -> InstallerResult<PathBuf> {
    let target = env.go_target()?;

    std::fs::create_dir_all(&opts.bin_dir)?;
    let output_path = opts.bin_dir.join(env.canonical_name());

    let status = Command::new(&opts.go_bin)
        .arg("build")
        .arg("-o")
        .arg(&output_path)
        .arg(&opts.source)
        .env("GOOS", target.goos)
        .env("GOARCH", target.goarch)
        .status()
        .map_err(|source| InstallerError::CompilerSpawn {
            program: opts.go_bin.clone(),
            source,
        })?;

    if !status.success() {
        return Err(InstallerError::BuildFailed {
            program: opts.go_bin.clone(),
            status: status.code().unwrap_or(-1),
        });
    }

    make_executable(&output_path)?;

    Ok(output_path)
}

/// Set owner rwx, group/other rx on the artifact.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> InstallerResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// Windows has no executable bit.
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> InstallerResult<()> {
    Ok(())
}
