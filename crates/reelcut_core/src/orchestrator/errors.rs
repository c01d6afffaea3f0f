//! Error types for the synthesis pipeline.
//!
//! Errors carry context that chains through layers:
//! Run → Stage → Operation → Detail

use thiserror::Error;

use crate::cues::CueSheetError;
use crate::draft::ProjectWriteError;

/// Top-level pipeline error with run context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage failed during execution.
    #[error("Run '{run_name}' failed at stage '{stage_name}': {source}")]
    StageFailed {
        run_name: String,
        stage_name: String,
        #[source]
        source: StageError,
    },

    /// Pipeline was cancelled at a stage boundary.
    #[error("Run '{run_name}' was cancelled")]
    Cancelled { run_name: String },
}

impl PipelineError {
    /// Create a stage failed error.
    pub fn stage_failed(
        run_name: impl Into<String>,
        stage_name: impl Into<String>,
        source: StageError,
    ) -> Self {
        Self::StageFailed {
            run_name: run_name.into(),
            stage_name: stage_name.into(),
            source,
        }
    }

    /// Create a cancelled error.
    pub fn cancelled(run_name: impl Into<String>) -> Self {
        Self::Cancelled {
            run_name: run_name.into(),
        }
    }
}

/// Error from a pipeline stage with operation context.
#[derive(Error, Debug)]
pub enum StageError {
    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// The cue sheet could not be parsed.
    #[error(transparent)]
    Parse(#[from] CueSheetError),

    /// The project could not be written to disk.
    #[error(transparent)]
    Write(#[from] ProjectWriteError),
}

impl StageError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }
}

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_preserves_parse_context() {
        let parse_err = CueSheetError::malformed(3, 2, "not-a-time");
        let err: StageError = parse_err.into();
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("not-a-time"));
    }

    #[test]
    fn pipeline_error_chains_context() {
        let stage_err = StageError::invalid_input("no media duration");
        let pipeline_err = PipelineError::stage_failed("talk_ep12", "Plan", stage_err);

        let msg = pipeline_err.to_string();
        assert!(msg.contains("talk_ep12"));
        assert!(msg.contains("Plan"));
        assert!(msg.contains("no media duration"));
    }
}
