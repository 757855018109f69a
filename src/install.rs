//! Artifact selection, placement, and PATH persistence.
//!
//! Copies the pre-built variant for the current host to the canonical
//! `gitflux` name inside `bin/`, then makes it reachable from the command
//! line: an rc-file append on Unix-like hosts, a `setx` invocation on
//! Windows.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::build::make_executable;
use crate::error::{InstallerError, InstallerResult};
use crate::platform::{HostEnv, Platform, Shell};
use crate::shell;

/// How PATH changes are persisted on Windows.
///
/// Historically both a direct `setx` edit and a generated `.cmd` launcher
/// existed; `Setx` is the canonical policy and `WrapperScript` is kept as an
/// explicit opt-in for hosts where a launcher next to the binary is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowsPathStrategy {
    #[default]
    Setx,
    WrapperScript,
}

/// Options for a single install run
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Directory holding the multi-platform artifact variants
    pub bin_dir: PathBuf,
    pub windows_strategy: WindowsPathStrategy,
}

impl InstallOptions {
    pub fn new(bin_dir: PathBuf) -> Self {
        Self {
            bin_dir,
            windows_strategy: WindowsPathStrategy::default(),
        }
    }
}

/// The environment mutation performed by an install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathChange {
    /// An export line was appended to a shell startup file
    RcFileAppended { rc_file: PathBuf, shell: Shell },
    /// The Windows user PATH was rewritten via `setx`
    WindowsPathSet,
    /// A `.cmd` launcher was written and the PATH rewritten
    WrapperScriptWritten { wrapper: PathBuf },
}

/// Result of a successful install run
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// The variant that was selected
    pub variant: PathBuf,
    /// The canonical binary path it was copied to
    pub target: PathBuf,
    pub change: PathChange,
}

/// Install the artifact variant for `env` and persist the PATH change.
///
/// Every step returns an error on failure; the caller owns exit-code policy.
pub fn run_install(env: &HostEnv, opts: &InstallOptions) -> InstallerResult<InstallOutcome> {
    let variant = opts.bin_dir.join(env.artifact_name());
    if !variant.exists() {
        return Err(InstallerError::MissingArtifact { path: variant });
    }

    let target = opts.bin_dir.join(env.canonical_name());
    std::fs::copy(&variant, &target)?;
    make_executable(&target)?;

    // Persist an absolute bin directory when we can resolve one; the
    // relative path still works for invocations from the same directory.
    let bin_dir = std::fs::canonicalize(&opts.bin_dir).unwrap_or_else(|_| opts.bin_dir.clone());

    let change = match env.platform {
        Platform::Windows => persist_windows_path(&bin_dir, opts.windows_strategy)?,
        _ => {
            let sh = env.shell.unwrap_or(Shell::Bash);
            let rc_file = shell::append_path_export(&env.home, sh, &bin_dir)?;
            PathChange::RcFileAppended { rc_file, shell: sh }
        }
    };

    Ok(InstallOutcome {
        variant,
        target,
        change,
    })
}

/// Contents of the `gitflux.cmd` launcher written by the wrapper strategy
pub fn wrapper_script_content() -> String {
    "@echo off\r\n\"%~dp0gitflux.exe\" %*\r\n".to_string()
}

fn persist_windows_path(
    bin_dir: &Path,
    strategy: WindowsPathStrategy,
) -> InstallerResult<PathChange> {
    if strategy == WindowsPathStrategy::WrapperScript {
        let wrapper = bin_dir.join("gitflux.cmd");
        std::fs::write(&wrapper, wrapper_script_content())?;
        run_setx(bin_dir)?;
        return Ok(PathChange::WrapperScriptWritten { wrapper });
    }

    run_setx(bin_dir)?;
    Ok(PathChange::WindowsPathSet)
}

fn run_setx(bin_dir: &Path) -> InstallerResult<()> {
    let value = format!("%PATH%;{}", bin_dir.display());
    let status = Command::new("setx")
        .arg("PATH")
        .arg(&value)
        .status()
        .map_err(|e| InstallerError::PathPersist {
            message: format!("could not spawn setx: {e}"),
        })?;

    if !status.success() {
        return Err(InstallerError::PathPersist {
            message: format!("setx exited with status {}", status.code().unwrap_or(-1)),
        });
    }

    Ok(())
}
