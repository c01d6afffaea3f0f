//! Plan stage: validate reels against media bounds and duration limits.

use crate::orchestrator::errors::{StageError, StageResult};
use crate::orchestrator::step::SynthesisStage;
use crate::orchestrator::types::{Context, SynthesisState};
use crate::planner::plan_reels;

/// Validates parsed reels and records exclusion diagnostics.
pub struct PlanStage;

impl SynthesisStage for PlanStage {
    fn name(&self) -> &str {
        "Plan"
    }

    fn validate_input(&self, ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        if !state.has_reels() {
            return Err(StageError::invalid_input("No parsed reels to plan"));
        }
        if ctx.media.duration_us == 0 {
            return Err(StageError::invalid_input("Media duration is zero"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut SynthesisState) -> StageResult<()> {
        let parsed = state.reels.clone().unwrap_or_default();
        let parsed_count = parsed.len();

        let plan = plan_reels(parsed, &ctx.media, &ctx.settings.timeline);

        for diagnostic in &plan.diagnostics {
            ctx.logger.warn(&diagnostic.to_string());
        }
        ctx.logger.info(&format!(
            "{} of {} reels valid ({:.1}s of content)",
            plan.reels.len(),
            parsed_count,
            plan.content_duration_us() as f64 / 1_000_000.0
        ));

        state.diagnostics = plan.diagnostics;
        state.planned = Some(plan.reels);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        if !state.has_plan() {
            return Err(StageError::invalid_output("Reel plan not recorded"));
        }
        Ok(())
    }
}
