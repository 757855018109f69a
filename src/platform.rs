//! Host platform, architecture, and shell resolution.
//!
//! All host introspection happens once, in [`HostEnv::detect`]. Every other
//! function in the crate takes a `HostEnv` parameter, so resolution logic is
//! testable with injected values instead of the real host.
//!
//! Test overrides: `GITFLUX_OS`, `GITFLUX_ARCH`, and `GITFLUX_HOME` replace
//! the corresponding host queries when set, so integration tests can exercise
//! foreign-platform resolution.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{InstallerError, InstallerResult};

/// Base name of the installed tool; suffixes are derived from this.
pub const BINARY_BASE: &str = "gitflux";

/// Supported operating systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    /// Parse an OS identifier as reported by `std::env::consts::OS`.
    ///
    /// Also accepts the Node-style identifiers (`darwin`, `win32`) so the
    /// `GITFLUX_OS` override matches either convention.
    pub fn from_os_identifier(s: &str) -> Option<Self> {
        match s {
            "macos" | "darwin" => Some(Platform::MacOs),
            "linux" => Some(Platform::Linux),
            "windows" | "win32" => Some(Platform::Windows),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

/// Supported CPU architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    /// Parse an architecture identifier as reported by
    /// `std::env::consts::ARCH` (or the Node-style `x64`/`amd64` aliases).
    pub fn from_arch_identifier(s: &str) -> Option<Self> {
        match s {
            "x86_64" | "amd64" | "x64" => Some(Arch::Amd64),
            "aarch64" | "arm64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

/// Shells whose startup files the installer knows how to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Bash,
    Zsh,
}

impl Shell {
    /// Resolve from the `SHELL` environment variable value.
    ///
    /// Anything that does not mention zsh falls back to bash, matching the
    /// rc-file selection the install flow has always used.
    pub fn from_shell_var(value: &str) -> Self {
        if value.contains("zsh") {
            Shell::Zsh
        } else {
            Shell::Bash
        }
    }

    /// Startup file name under the home directory
    pub fn rc_file(&self) -> &'static str {
        match self {
            Shell::Bash => ".bashrc",
            Shell::Zsh => ".zshrc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
        }
    }
}

/// Cross-compilation target passed to the Go toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoTarget {
    pub goos: &'static str,
    pub goarch: &'static str,
}

/// Explicit host configuration, populated once at startup.
///
/// Carries everything the resolver, build invoker, and installer need to
/// know about the host, so none of them touch ambient state themselves.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub platform: Platform,
    /// None only when the shell is irrelevant (Windows hosts)
    pub shell: Option<Shell>,
    pub arch: Arch,
    pub home: PathBuf,
}

impl HostEnv {
    /// Detect the host environment.
    ///
    /// Unknown OS or CPU identifiers are an explicit error rather than
    /// undefined behavior downstream.
    pub fn detect() -> InstallerResult<Self> {
        let os = std::env::var("GITFLUX_OS").unwrap_or_else(|_| std::env::consts::OS.to_string());
        let arch_id =
            std::env::var("GITFLUX_ARCH").unwrap_or_else(|_| std::env::consts::ARCH.to_string());

        let platform = Platform::from_os_identifier(&os);
        let arch = Arch::from_arch_identifier(&arch_id);
        let (platform, arch) = match (platform, arch) {
            (Some(p), Some(a)) => (p, a),
            _ => {
                return Err(InstallerError::UnsupportedHost { os, arch: arch_id });
            }
        };

        let shell = if platform == Platform::Windows {
            None
        } else {
            let var = std::env::var("SHELL").unwrap_or_else(|_| "/bin/bash".to_string());
            Some(Shell::from_shell_var(&var))
        };

        let home = match std::env::var("GITFLUX_HOME") {
            Ok(h) => PathBuf::from(h),
            Err(_) => dirs::home_dir().ok_or(InstallerError::NoHomeDir)?,
        };

        Ok(Self {
            platform,
            arch,
            shell,
            home,
        })
    }

    /// Resolve the Go cross-compilation target for this host.
    ///
    /// The supported set is exactly the set of pairs gitflux releases are
    /// built for. Windows builds always target amd64. Linux/arm64 has no
    /// build target and fails fast.
    pub fn go_target(&self) -> InstallerResult<GoTarget> {
        match (self.platform, self.arch) {
            (Platform::MacOs, Arch::Arm64) => Ok(GoTarget {
                goos: "darwin",
                goarch: "arm64",
            }),
            (Platform::MacOs, Arch::Amd64) => Ok(GoTarget {
                goos: "darwin",
                goarch: "amd64",
            }),
            (Platform::Linux, Arch::Amd64) => Ok(GoTarget {
                goos: "linux",
                goarch: "amd64",
            }),
            (Platform::Windows, _) => Ok(GoTarget {
                goos: "windows",
                goarch: "amd64",
            }),
            (Platform::Linux, Arch::Arm64) => Err(InstallerError::UnsupportedBuildTarget {
                platform: self.platform.display_name(),
                arch: self.arch.display_name(),
            }),
        }
    }

    /// Name of the pre-built artifact variant for this host.
    ///
    /// These are the literal release file names; macOS/amd64 and linux/amd64
    /// carry no arch segment for historical reasons.
    pub fn artifact_name(&self) -> String {
        match (self.platform, self.arch) {
            (Platform::Windows, Arch::Arm64) => format!("{BINARY_BASE}-windows-arm64.exe"),
            (Platform::Windows, Arch::Amd64) => format!("{BINARY_BASE}-windows-amd64.exe"),
            (Platform::MacOs, Arch::Arm64) => format!("{BINARY_BASE}-macos-arm64"),
            (Platform::MacOs, Arch::Amd64) => format!("{BINARY_BASE}-macos"),
            (Platform::Linux, Arch::Arm64) => format!("{BINARY_BASE}-linux-arm64"),
            (Platform::Linux, Arch::Amd64) => format!("{BINARY_BASE}-linux"),
        }
    }

    /// Canonical installed binary name for this host
    pub fn canonical_name(&self) -> &'static str {
        match self.platform {
            Platform::Windows => "gitflux.exe",
            _ => "gitflux",
        }
    }
}
