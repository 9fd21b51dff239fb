//! assetvfs binary.
//!
//! Inspects an asset overlay the same way an application would see it.
//!
//! Usage:
//!   # Use ~/.config/assetvfs/mounts.ron
//!   assetvfs mounts
//!
//!   # Ad hoc overlay: loose files first, then the packaged archive
//!   assetvfs --mount assets/=./assets --mount assets/=base.tar cat assets/shaders/a.glsl
//!   assetvfs --mount assets/=./assets ls assets/ui --filter png:jpg
//!
//! Logging goes to stderr; set RUST_LOG=assetvfs_core=debug to watch routing.

mod app;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use assetvfs_core::VfsConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use app::App;

/// Read-only asset overlay inspector.
#[derive(Parser, Debug)]
#[command(name = "assetvfs")]
#[command(about = "Inspect a prefix-routed asset overlay")]
struct Args {
    /// Mount config file (default: ~/.config/assetvfs/mounts.ron if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra mount as PREFIX=SOURCE; .tar sources are archives. Repeatable.
    #[arg(short, long = "mount", value_name = "PREFIX=SOURCE")]
    mounts: Vec<String>,

    /// Serve absolute local paths directly from disk
    #[arg(long)]
    local_passthrough: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a file's contents to stdout
    Cat { path: String },
    /// List a directory
    Ls {
        path: String,
        /// Colon-separated extensions, e.g. "png:jpg"
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show metadata for a path
    Stat { path: String },
    /// Show registered prefixes in lookup order
    Mounts,
}

fn load_config(args: &Args) -> Result<VfsConfig> {
    let mut config = match &args.config {
        Some(path) => VfsConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => match VfsConfig::default_path().filter(|p| p.exists()) {
            Some(path) => VfsConfig::load(&path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => VfsConfig::default(),
        },
    };
    if args.local_passthrough {
        config.local_passthrough = true;
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let mut app = App::start(config, &args.mounts)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match &args.command {
        Command::Cat { path } => app::cat(app.registry(), path, &mut out),
        Command::Ls { path, filter } => app::ls(app.registry(), path, filter.as_deref(), &mut out),
        Command::Stat { path } => app::stat(app.registry(), path, &mut out),
        Command::Mounts => app::mounts(app.registry(), &mut out),
    };
    out.flush()?;

    app.shutdown();
    result
}

fn main() -> ExitCode {
    // Logs on stderr so `cat` output stays clean
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "starting");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("assetvfs: {e:#}");
            ExitCode::FAILURE
        }
    }
}
