//! Core types for the synthesis pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::logging::RunLogger;
use crate::models::{MediaInfo, Project, Reel};
use crate::planner::PlanDiagnostic;

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (stage_name, percent_complete, message)
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Read-only context passed to pipeline stages.
///
/// Contains run configuration and shared resources that stages can read
/// but not modify. Mutable state goes in `SynthesisState`.
pub struct Context {
    /// Source media description (externally probed).
    pub media: MediaInfo,
    /// Application settings.
    pub settings: Settings,
    /// Run name/identifier.
    pub run_name: String,
    /// Human-facing name for the produced project.
    pub project_name: String,
    /// Per-run logger.
    pub logger: Arc<RunLogger>,
    /// Optional progress callback.
    progress_callback: Option<ProgressCallback>,
}

impl Context {
    /// Create a new context for a run.
    pub fn new(
        media: MediaInfo,
        settings: Settings,
        run_name: impl Into<String>,
        logger: Arc<RunLogger>,
    ) -> Self {
        let run_name = run_name.into();
        let project_name = media
            .file_stem()
            .map(str::to_string)
            .unwrap_or_else(|| run_name.clone());
        Self {
            media,
            settings,
            run_name,
            project_name,
            logger,
            progress_callback: None,
        }
    }

    /// Override the project name (defaults to the media file stem).
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Report progress to the callback (if set).
    pub fn report_progress(&self, stage_name: &str, percent: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(stage_name, percent, message);
        }
    }
}

/// Mutable run state that accumulates results from pipeline stages.
///
/// Each stage stores its output in its own slot; later stages read the
/// slots of earlier ones and never overwrite them.
#[derive(Debug, Default)]
pub struct SynthesisState {
    /// Parsed reels (from the Parse stage).
    pub reels: Option<Vec<Reel>>,
    /// Validated reels (from the Plan stage).
    pub planned: Option<Vec<Reel>>,
    /// Per-reel diagnostics collected during planning.
    pub diagnostics: Vec<PlanDiagnostic>,
    /// Synthesized project graph (from the Layout stage).
    pub project: Option<Project>,
    /// Written project directory (from the Write stage).
    pub project_dir: Option<PathBuf>,
}

impl SynthesisState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if parsing has completed.
    pub fn has_reels(&self) -> bool {
        self.reels.is_some()
    }

    /// Check if planning has completed.
    pub fn has_plan(&self) -> bool {
        self.planned.is_some()
    }

    /// Check if layout has completed.
    pub fn has_project(&self) -> bool {
        self.project.is_some()
    }
}

/// Summary of a completed synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// Directory the project was written to.
    pub project_dir: PathBuf,
    /// Id of the produced project.
    pub project_id: String,
    /// Number of reels placed on the timeline.
    pub reel_count: usize,
    /// Number of segments across all tracks.
    pub segment_count: usize,
    /// Total timeline duration in microseconds.
    pub total_duration_us: u64,
    /// Per-reel diagnostics for everything that was excluded.
    pub diagnostics: Vec<PlanDiagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogConfig;
    use tempfile::tempdir;

    #[test]
    fn project_name_defaults_to_media_stem() {
        let dir = tempdir().unwrap();
        let logger =
            Arc::new(RunLogger::new("run", dir.path(), LogConfig::default(), None).unwrap());
        let media = MediaInfo::new("/videos/talk_ep12.mp4", 1_000_000);

        let ctx = Context::new(media, Settings::default(), "run", logger);
        assert_eq!(ctx.project_name, "talk_ep12");

        let ctx = ctx.with_project_name("custom");
        assert_eq!(ctx.project_name, "custom");
    }

    #[test]
    fn state_tracks_completion() {
        let mut state = SynthesisState::new();
        assert!(!state.has_reels());

        state.reels = Some(Vec::new());
        assert!(state.has_reels());
        assert!(!state.has_plan());
    }
}
