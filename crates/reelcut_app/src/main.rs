//! Reelcut command-line host.
//!
//! Drives the synthesis pipeline on a background worker thread, relaying
//! per-run log lines and stage progress to the terminal, and offers an
//! `inspect` subcommand that audits an existing draft file.

mod generate;
mod inspect;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reelcut", version, about = "Turn cue sheets into editing projects")]
struct Cli {
    /// Path to the configuration file (created with defaults if missing)
    #[arg(long, global = true, default_value = "reelcut.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an editing project from a video and a cue sheet
    Generate(GenerateArgs),
    /// Check an existing draft file against the timeline invariants
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Source video file
    video: PathBuf,

    /// Cue sheet file: `<start> <end> <label/comment>` lines, reels
    /// separated by blank lines
    #[arg(long)]
    cuts: PathBuf,

    /// Source video duration in seconds (externally probed)
    #[arg(long)]
    duration: f64,

    /// Project name (defaults to the video file stem)
    #[arg(long)]
    name: Option<String>,

    /// Treat the video as having no audio stream
    #[arg(long)]
    no_audio: bool,

    /// Override the configured inter-reel gap, in seconds
    #[arg(long)]
    gap: Option<u32>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Draft file, or a project directory containing one
    draft: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let project_dir = generate::run(&cli.config, args)?;
            println!("Project ready: {}", project_dir.display());
            Ok(())
        }
        Commands::Inspect(args) => inspect::run(args),
    }
}
