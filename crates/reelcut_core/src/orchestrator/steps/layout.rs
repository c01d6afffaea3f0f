//! Layout stage: place validated reels on the output timeline.

use crate::orchestrator::errors::{StageError, StageResult};
use crate::orchestrator::step::SynthesisStage;
use crate::orchestrator::types::{Context, SynthesisState};
use crate::timeline::synthesize;

/// Builds the project graph from the validated reel plan.
pub struct LayoutStage;

impl SynthesisStage for LayoutStage {
    fn name(&self) -> &str {
        "Layout"
    }

    fn validate_input(&self, _ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        if !state.has_plan() {
            return Err(StageError::invalid_input("No reel plan to lay out"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut SynthesisState) -> StageResult<()> {
        let reels = state.planned.clone().unwrap_or_default();

        let project = synthesize(
            &reels,
            &ctx.media,
            &ctx.settings.timeline,
            &ctx.project_name,
        );

        ctx.logger.info(&format!(
            "Laid out {} reels as {} segments, timeline {:.1}s",
            reels.len(),
            project.segment_count(),
            project.total_duration_us as f64 / 1_000_000.0
        ));

        state.project = Some(project);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        let project = state
            .project
            .as_ref()
            .ok_or_else(|| StageError::invalid_output("Project graph not recorded"))?;

        for track in &project.tracks {
            if !track.is_well_formed() {
                return Err(StageError::invalid_output(format!(
                    "{} track segments overlap",
                    track.kind
                )));
            }
        }

        Ok(())
    }
}
