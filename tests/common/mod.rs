//! Common test utilities for installer integration tests.
//!
//! Provides `TestEnv`: an isolated environment with temp directories for the
//! working tree and HOME, plus helpers to run the installer CLI with injected
//! platform/arch values.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running an installer CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
///
/// The CLI reads `GITFLUX_OS` / `GITFLUX_ARCH` / `GITFLUX_HOME` overrides, so
/// tests pin the host instead of depending on the machine running them.
pub struct TestEnv {
    /// Temporary working directory (holds `bin/`)
    pub work_dir: TempDir,
    /// Temporary directory used as HOME
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
        }
    }

    /// Path relative to the working directory
    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    /// Path relative to the fake home directory
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    /// Run the installer CLI from the working directory
    pub fn run(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let bin = env!("CARGO_BIN_EXE_gitflux-installer");

        let mut cmd = Command::new(bin);
        cmd.current_dir(self.work_dir.path())
            .args(args)
            .env("GITFLUX_HOME", self.home_dir.path())
            .env_remove("GITFLUX_OS")
            .env_remove("GITFLUX_ARCH")
            .env_remove("GITFLUX_GO");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute gitflux-installer");
        output_to_result(output)
    }

    /// Write an executable script into the working directory (unix only)
    #[cfg(unix)]
    pub fn write_script(&self, relative: &str, content: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.work_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create script dir");
        }
        std::fs::write(&path, content).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
        path
    }

    /// Read a file under the fake home, empty string if missing
    pub fn read_home_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.home_path(relative)).unwrap_or_default()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Count lines in `content` containing `needle`
#[allow(dead_code)]
pub fn count_lines_containing(content: &str, needle: &str) -> usize {
    content.lines().filter(|l| l.contains(needle)).count()
}
