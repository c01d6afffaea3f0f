//! Generate command - runs synthesis on a worker thread, relaying
//! progress and log messages to the terminal.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, bail, Context as _, Result};
use tracing::warn;

use reelcut_core::config::ConfigManager;
use reelcut_core::logging::{HostLogCallback, LogConfig, RunLogger};
use reelcut_core::models::MediaInfo;
use reelcut_core::orchestrator::{run_synthesis, Context, ProgressCallback};

use crate::GenerateArgs;

/// Messages the worker thread sends back to the terminal loop.
enum WorkerEvent {
    /// A formatted log line from the run logger.
    Log(String),
    /// Stage progress update.
    Progress { stage: String, percent: u32 },
}

/// Run the generate command. Returns the written project directory.
pub fn run(config_path: &Path, args: GenerateArgs) -> Result<PathBuf> {
    if !args.duration.is_finite() || args.duration <= 0.0 {
        bail!("--duration must be a positive number of seconds");
    }

    let mut manager = ConfigManager::new(config_path);
    manager
        .load_or_create()
        .with_context(|| format!("loading config {}", config_path.display()))?;
    if let Some(gap) = args.gap {
        manager.settings_mut().timeline.gap_between_reels_seconds = gap;
    }
    manager.ensure_dirs_exist().context("creating output directories")?;
    let settings = manager.settings().clone();

    let cue_text = fs::read_to_string(&args.cuts)
        .with_context(|| format!("reading cue sheet {}", args.cuts.display()))?;

    let video_path = fs::canonicalize(&args.video).unwrap_or_else(|_| args.video.clone());
    let duration_us = (args.duration * 1_000_000.0).round() as u64;
    let media = MediaInfo::new(video_path, duration_us).with_audio(!args.no_audio);

    let run_name = media
        .file_stem()
        .map(str::to_string)
        .unwrap_or_else(|| "reelcut_run".to_string());

    // One-way handoff from the worker to this thread; the pipeline never
    // blocks on it.
    let (tx, rx) = mpsc::channel::<WorkerEvent>();

    let log_tx = tx.clone();
    let log_callback: HostLogCallback = Box::new(move |line| {
        let _ = log_tx.send(WorkerEvent::Log(line.to_string()));
    });

    let logger = Arc::new(
        RunLogger::new(
            &run_name,
            manager.logs_folder(),
            LogConfig::from_settings(&settings.logging),
            Some(log_callback),
        )
        .context("creating run log file")?,
    );
    let log_path = logger.log_path().to_path_buf();

    let progress_tx = tx.clone();
    let progress_callback: ProgressCallback = Box::new(move |stage, percent, _message| {
        let _ = progress_tx.send(WorkerEvent::Progress {
            stage: stage.to_string(),
            percent,
        });
    });

    let mut ctx = Context::new(media, settings, &run_name, logger)
        .with_progress_callback(progress_callback);
    if let Some(name) = args.name {
        ctx = ctx.with_project_name(name);
    }

    drop(tx);
    let handle = thread::spawn(move || {
        let outcome = run_synthesis(&cue_text, &ctx);
        ctx.logger.flush();
        outcome
    });

    // Drain until the worker drops its channel ends
    for event in rx {
        match event {
            WorkerEvent::Log(line) => println!("{line}"),
            WorkerEvent::Progress { stage, percent } => println!("[{percent:>3}%] {stage}"),
        }
    }

    let outcome = handle
        .join()
        .map_err(|_| anyhow!("worker thread panicked"))??;

    for diagnostic in &outcome.diagnostics {
        warn!("{diagnostic}");
    }
    if outcome.reel_count == 0 && !outcome.diagnostics.is_empty() {
        warn!("no reels survived validation; the project timeline is empty");
    }

    println!(
        "{} reels, {} segments, {:.1}s timeline (log: {})",
        outcome.reel_count,
        outcome.segment_count,
        outcome.total_duration_us as f64 / 1_000_000.0,
        log_path.display()
    );

    Ok(outcome.project_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(video: PathBuf, cuts: PathBuf) -> GenerateArgs {
        GenerateArgs {
            video,
            cuts,
            duration: 1800.0,
            name: None,
            no_audio: false,
            gap: None,
        }
    }

    #[test]
    fn generates_a_project_end_to_end() {
        let dir = tempdir().unwrap();
        let video = dir.path().join("talk.mp4");
        fs::write(&video, b"media bytes").unwrap();
        let cuts = dir.path().join("cuts.txt");
        fs::write(&cuts, "00:15:30 00:15:35 (HOOK)\n\n00:20:00 00:20:05\n").unwrap();

        let config = dir.path().join("reelcut.toml");
        fs::write(
            &config,
            format!(
                "[paths]\nprojects_root = \"{}\"\nlogs_folder = \"{}\"\n",
                dir.path().join("projects").display(),
                dir.path().join("logs").display()
            ),
        )
        .unwrap();

        let project_dir = run(&config, args(video, cuts)).unwrap();

        assert!(project_dir.join("draft_content.json").is_file());
        assert!(project_dir.join("talk.mp4").is_file());
        assert!(dir.path().join("logs").join("talk.log").is_file());
    }

    #[test]
    fn rejects_non_positive_duration() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path().join("v.mp4"), dir.path().join("c.txt"));
        a.duration = 0.0;
        assert!(run(&dir.path().join("reelcut.toml"), a).is_err());
    }
}
