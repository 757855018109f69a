//! Gitflux installer CLI
//!
//! Usage: gitflux-installer <COMMAND>
//!
//! Commands:
//!   build    Cross-compile gitflux for the current host
//!   install  Copy the matching pre-built artifact into place and update PATH
//!   detect   Print the resolved host platform, arch, and artifact names

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gitflux_installer::install::WindowsPathStrategy;
use gitflux_installer::platform::Platform;
use gitflux_installer::{BuildOptions, HostEnv, InstallOptions, PathChange};

/// Gitflux installer - build and install bootstrap for the gitflux CLI
#[derive(Parser, Debug)]
#[command(name = "gitflux-installer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, default_value = "false")]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cross-compile gitflux for the current host
    Build {
        /// Output directory for the artifact
        #[arg(long, default_value = "bin")]
        bin_dir: PathBuf,

        /// Go entry point to compile
        #[arg(long, default_value = "main.go")]
        source: PathBuf,
    },

    /// Copy the matching pre-built artifact into place and update PATH
    Install {
        /// Directory holding the multi-platform artifact variants
        #[arg(long, default_value = "bin")]
        bin_dir: PathBuf,

        /// On Windows, write a .cmd launcher instead of relying on setx alone
        #[arg(long)]
        wrapper_script: bool,
    },

    /// Print the resolved host platform, arch, and artifact names
    Detect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = HostEnv::detect()?;

    match cli.command {
        Commands::Build { bin_dir, source } => cmd_build(&env, bin_dir, source, cli.json),
        Commands::Install {
            bin_dir,
            wrapper_script,
        } => cmd_install(&env, bin_dir, wrapper_script, cli.json),
        Commands::Detect => cmd_detect(&env, cli.json),
    }
}

fn cmd_build(env: &HostEnv, bin_dir: PathBuf, source: PathBuf, json: bool) -> Result<()> {
    let target = env.go_target()?;

    if !json {
        println!("📦 Gitflux Build");
        println!(
            "Target: {}/{} (GOOS={} GOARCH={})",
            env.platform.display_name(),
            env.arch.display_name(),
            target.goos,
            target.goarch
        );
    }

    let opts = BuildOptions::new(bin_dir, source);
    let artifact = gitflux_installer::run_build(env, &opts)?;

    if json {
        let output = serde_json::json!({
            "event": "build",
            "status": "success",
            "goos": target.goos,
            "goarch": target.goarch,
            "artifact": artifact.display().to_string(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "\n✓ Built {} for {}-{}",
            artifact.display(),
            env.platform.display_name(),
            env.arch.display_name()
        );
    }

    Ok(())
}

fn cmd_install(env: &HostEnv, bin_dir: PathBuf, wrapper_script: bool, json: bool) -> Result<()> {
    if !json {
        println!("📦 Gitflux Install");
        println!(
            "Host: {}/{}",
            env.platform.display_name(),
            env.arch.display_name()
        );
    }

    let mut opts = InstallOptions::new(bin_dir);
    if wrapper_script {
        opts.windows_strategy = WindowsPathStrategy::WrapperScript;
    }

    let outcome = gitflux_installer::run_install(env, &opts)?;

    if json {
        let change = match &outcome.change {
            PathChange::RcFileAppended { rc_file, shell } => serde_json::json!({
                "kind": "rc_file_appended",
                "rc_file": rc_file.display().to_string(),
                "shell": shell.display_name(),
            }),
            PathChange::WindowsPathSet => serde_json::json!({ "kind": "windows_path_set" }),
            PathChange::WrapperScriptWritten { wrapper } => serde_json::json!({
                "kind": "wrapper_script_written",
                "wrapper": wrapper.display().to_string(),
            }),
        };
        let output = serde_json::json!({
            "event": "install",
            "status": "success",
            "variant": outcome.variant.display().to_string(),
            "target": outcome.target.display().to_string(),
            "path_change": change,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("\n✓ Installed {}", outcome.target.display());
    match &outcome.change {
        PathChange::RcFileAppended { rc_file, shell } => {
            println!(
                "✓ gitflux has been added to your PATH via {}",
                rc_file.display()
            );
            println!(
                "  Run 'source ~/{}' or restart your terminal.",
                shell.rc_file()
            );
        }
        PathChange::WindowsPathSet => {
            println!("✓ gitflux has been added to your PATH. Please restart your terminal.");
        }
        PathChange::WrapperScriptWritten { wrapper } => {
            println!("✓ Wrapper launcher written: {}", wrapper.display());
            println!("✓ gitflux has been added to your PATH. Please restart your terminal.");
        }
    }

    Ok(())
}

fn cmd_detect(env: &HostEnv, json: bool) -> Result<()> {
    // Linux/arm64 installs fine but has no build target; report that
    // instead of failing the whole command.
    let target = env.go_target().ok();

    if json {
        let output = serde_json::json!({
            "event": "detect",
            "platform": env.platform.display_name(),
            "arch": env.arch.display_name(),
            "shell": env.shell.map(|s| s.display_name()),
            "artifact": env.artifact_name(),
            "target": env.canonical_name(),
            "goos": target.map(|t| t.goos),
            "goarch": target.map(|t| t.goarch),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("🔍 Gitflux Host Detection");
    println!("Platform: {}", env.platform.display_name());
    println!("Arch:     {}", env.arch.display_name());
    if let Some(shell) = env.shell {
        println!("Shell:    {} (~/{})", shell.display_name(), shell.rc_file());
    } else if env.platform == Platform::Windows {
        println!("Shell:    n/a (Windows)");
    }
    println!("Artifact: {}", env.artifact_name());
    println!("Binary:   {}", env.canonical_name());
    match target {
        Some(t) => println!("Build:    GOOS={} GOARCH={}", t.goos, t.goarch),
        None => println!("Build:    unavailable for this host"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_build() {
        let cli = Cli::try_parse_from(["gitflux-installer", "build"]).unwrap();
        assert!(matches!(cli.command, Commands::Build { .. }));
    }

    #[test]
    fn test_cli_parse_build_with_args() {
        let cli = Cli::try_parse_from([
            "gitflux-installer",
            "build",
            "--bin-dir",
            "out",
            "--source",
            "cmd/gitflux/main.go",
        ])
        .unwrap();

        if let Commands::Build { bin_dir, source } = cli.command {
            assert_eq!(bin_dir, PathBuf::from("out"));
            assert_eq!(source, PathBuf::from("cmd/gitflux/main.go"));
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_cli_parse_install() {
        let cli = Cli::try_parse_from(["gitflux-installer", "install"]).unwrap();
        if let Commands::Install {
            bin_dir,
            wrapper_script,
        } = cli.command
        {
            assert_eq!(bin_dir, PathBuf::from("bin"));
            assert!(!wrapper_script);
        } else {
            panic!("Expected Install command");
        }
    }

    #[test]
    fn test_cli_parse_install_wrapper_script() {
        let cli =
            Cli::try_parse_from(["gitflux-installer", "install", "--wrapper-script"]).unwrap();
        if let Commands::Install { wrapper_script, .. } = cli.command {
            assert!(wrapper_script);
        } else {
            panic!("Expected Install command");
        }
    }

    #[test]
    fn test_cli_parse_detect() {
        let cli = Cli::try_parse_from(["gitflux-installer", "detect"]).unwrap();
        assert!(matches!(cli.command, Commands::Detect));
    }

    #[test]
    fn test_cli_json_flag() {
        let cli = Cli::try_parse_from(["gitflux-installer", "--json", "detect"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["gitflux-installer", "-vv", "detect"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
