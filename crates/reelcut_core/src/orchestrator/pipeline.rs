//! Pipeline runner that executes stages in sequence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::{PipelineError, PipelineResult};
use super::step::SynthesisStage;
use super::types::{Context, SynthesisState};

/// Pipeline that runs a sequence of synthesis stages.
///
/// Stages execute strictly in order, with validation before and after each
/// one. Cancellation is honored only at stage boundaries, never mid-stage,
/// so a cancelled run leaves no half-written artifact.
pub struct Pipeline {
    /// Stages to execute in order.
    stages: Vec<Box<dyn SynthesisStage>>,
    /// Cancellation flag.
    cancelled: Arc<AtomicBool>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a stage (builder pattern).
    pub fn with_stage<S: SynthesisStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Get a cancellation handle.
    ///
    /// Call `cancel()` on the returned handle to stop the pipeline at the
    /// next stage boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Check if the pipeline has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run the pipeline with the given context and state.
    ///
    /// For each stage: check for cancellation, run `validate_input`,
    /// `execute`, then `validate_output`. Returns the first failure wrapped
    /// with run and stage context.
    pub fn run(&self, ctx: &Context, state: &mut SynthesisState) -> PipelineResult<()> {
        let total = self.stages.len();

        for (i, stage) in self.stages.iter().enumerate() {
            if self.is_cancelled() {
                ctx.logger
                    .warn(&format!("Cancelled before stage '{}'", stage.name()));
                return Err(PipelineError::cancelled(&ctx.run_name));
            }

            let stage_name = stage.name();
            ctx.logger.phase(stage_name);

            let percent = ((i as f64 / total as f64) * 100.0) as u32;
            ctx.report_progress(stage_name, percent, &format!("Starting {}", stage_name));

            if let Err(e) = stage.validate_input(ctx, state) {
                ctx.logger.error(&format!("Input validation failed: {}", e));
                return Err(PipelineError::stage_failed(&ctx.run_name, stage_name, e));
            }

            if let Err(e) = stage.execute(ctx, state) {
                ctx.logger.error(&format!("Execution failed: {}", e));
                return Err(PipelineError::stage_failed(&ctx.run_name, stage_name, e));
            }

            if let Err(e) = stage.validate_output(ctx, state) {
                ctx.logger.error(&format!("Output validation failed: {}", e));
                return Err(PipelineError::stage_failed(&ctx.run_name, stage_name, e));
            }

            ctx.logger.success(&format!("{} completed", stage_name));
        }

        ctx.report_progress("Complete", 100, "Pipeline finished");
        Ok(())
    }

    /// Get the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Get stage names in order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for cancelling a running pipeline.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the pipeline.
    ///
    /// The pipeline will stop at the next stage boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
