//! Pipeline stage trait definition.
//!
//! All synthesis stages implement this trait, providing a consistent
//! interface for validation and execution.

use super::errors::StageResult;
use super::types::{Context, SynthesisState};

/// Trait for synthesis pipeline stages.
///
/// The pipeline runner calls these methods in order for each stage:
///
/// 1. `validate_input` - check preconditions before execution
/// 2. `execute` - perform the stage's work
/// 3. `validate_output` - verify the stage produced valid output
pub trait SynthesisStage: Send + Sync {
    /// Get the stage name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    ///
    /// Should check that all required preconditions are met (earlier
    /// stages completed, media description sane, etc.).
    fn validate_input(&self, ctx: &Context, state: &SynthesisState) -> StageResult<()>;

    /// Execute the stage's main work.
    ///
    /// Should perform the stage's processing and record results in
    /// `state`. Use `ctx.logger` for logging.
    fn execute(&self, ctx: &Context, state: &mut SynthesisState) -> StageResult<()>;

    /// Validate outputs after execution.
    ///
    /// Should verify that the stage produced valid output (state slot
    /// populated, invariants hold).
    fn validate_output(&self, ctx: &Context, state: &SynthesisState) -> StageResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStage;

    impl SynthesisStage for MockStage {
        fn name(&self) -> &str {
            "Mock"
        }

        fn validate_input(&self, _ctx: &Context, _state: &SynthesisState) -> StageResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut SynthesisState) -> StageResult<()> {
            Ok(())
        }

        fn validate_output(&self, _ctx: &Context, _state: &SynthesisState) -> StageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn stage_trait_object_works() {
        let stage: Box<dyn SynthesisStage> = Box::new(MockStage);
        assert_eq!(stage.name(), "Mock");
    }
}
