//! Synthesis orchestration.
//!
//! Runs the four stages (Parse → Plan → Layout → Write) strictly in
//! sequence on the caller's thread. Hosts that need a responsive interface
//! run the whole pipeline on a worker thread and receive progress through
//! the callback; the pipeline itself never blocks on that channel.

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StageError, StageResult};
pub use pipeline::{CancelHandle, Pipeline};
pub use step::SynthesisStage;
pub use types::{Context, ProgressCallback, SynthesisOutcome, SynthesisState};

use steps::{LayoutStage, ParseStage, PlanStage, WriteStage};

/// Build the standard four-stage synthesis pipeline.
pub fn synthesis_pipeline(cue_text: impl Into<String>) -> Pipeline {
    Pipeline::new()
        .with_stage(ParseStage::new(cue_text))
        .with_stage(PlanStage)
        .with_stage(LayoutStage)
        .with_stage(WriteStage)
}

/// Run a complete synthesis: cue sheet text in, project directory out.
///
/// Per-reel validation problems are carried in the outcome's diagnostics;
/// parse and write failures abort the run.
pub fn run_synthesis(cue_text: &str, ctx: &Context) -> PipelineResult<SynthesisOutcome> {
    let pipeline = synthesis_pipeline(cue_text);
    let mut state = SynthesisState::new();

    pipeline.run(ctx, &mut state)?;

    let project = state.project.as_ref();
    Ok(SynthesisOutcome {
        project_dir: state.project_dir.clone().unwrap_or_default(),
        project_id: project.map(|p| p.id.clone()).unwrap_or_default(),
        reel_count: state.planned.as_ref().map(Vec::len).unwrap_or(0),
        segment_count: project.map(|p| p.segment_count()).unwrap_or(0),
        total_duration_us: project.map(|p| p.total_duration_us).unwrap_or(0),
        diagnostics: state.diagnostics,
    })
}
