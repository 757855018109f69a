//! Gitflux installer - build and install bootstrap for the gitflux CLI
//!
//! Resolves the host platform and architecture once into an explicit
//! [`HostEnv`], cross-compiles gitflux for that host, and installs the
//! resulting artifact: copy to the canonical name, then persist a PATH
//! change through the shell startup file (Unix) or `setx` (Windows).

pub mod build;
pub mod error;
pub mod install;
pub mod platform;
pub mod shell;

// Re-exports for convenience
pub use build::{run_build, BuildOptions};
pub use error::{InstallerError, InstallerResult};
pub use install::{run_install, InstallOptions, InstallOutcome, PathChange, WindowsPathStrategy};
pub use platform::{Arch, GoTarget, HostEnv, Platform, Shell, BINARY_BASE};
pub use shell::{append_path_export, path_export_line};
