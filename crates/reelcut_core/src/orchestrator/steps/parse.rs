//! Parse stage: cue sheet text → reels.

use crate::cues::parse_cue_sheet;
use crate::orchestrator::errors::{StageError, StageResult};
use crate::orchestrator::step::SynthesisStage;
use crate::orchestrator::types::{Context, SynthesisState};

/// Parses the cue sheet text captured at pipeline construction.
pub struct ParseStage {
    cue_text: String,
}

impl ParseStage {
    /// Create the stage for the given cue sheet text.
    pub fn new(cue_text: impl Into<String>) -> Self {
        Self {
            cue_text: cue_text.into(),
        }
    }
}

impl SynthesisStage for ParseStage {
    fn name(&self) -> &str {
        "Parse"
    }

    fn validate_input(&self, _ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        if state.has_reels() {
            return Err(StageError::invalid_input("Cue sheet already parsed"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut SynthesisState) -> StageResult<()> {
        let reels = parse_cue_sheet(&self.cue_text)?;

        let cue_count: usize = reels.iter().map(|r| r.len()).sum();
        ctx.logger.info(&format!(
            "Parsed {} reels ({} cues) from cue sheet",
            reels.len(),
            cue_count
        ));

        state.reels = Some(reels);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        if !state.has_reels() {
            return Err(StageError::invalid_output("Parsed reels not recorded"));
        }
        Ok(())
    }
}
