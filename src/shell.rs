//! Shell startup-file PATH persistence for Unix-like hosts.
//!
//! Appends an export line to `~/.bashrc` or `~/.zshrc`. Appends are
//! unconditional: re-running the installer accumulates duplicate lines.
//! Writes are plain `O_APPEND` with no locking, so concurrent installer runs
//! may interleave.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::InstallerResult;
use crate::platform::Shell;

/// The export line appended to the shell startup file
pub fn path_export_line(bin_dir: &Path) -> String {
    format!("export PATH=\"$PATH:{}\"", bin_dir.display())
}

/// Append a PATH export for `bin_dir` to the startup file of `shell`.
///
/// Returns the path of the file that was modified.
pub fn append_path_export(home: &Path, shell: Shell, bin_dir: &Path) -> InstallerResult<PathBuf> {
    let rc_path = home.join(shell.rc_file());

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&rc_path)?;
    writeln!(file, "\n{}", path_export_line(bin_dir))?;

    Ok(rc_path)
}
