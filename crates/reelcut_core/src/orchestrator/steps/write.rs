//! Write stage: materialize the project directory on disk.

use crate::draft::ProjectWriter;
use crate::orchestrator::errors::{StageError, StageResult};
use crate::orchestrator::step::SynthesisStage;
use crate::orchestrator::types::{Context, SynthesisState};

/// Copies the media and writes the draft document atomically.
pub struct WriteStage;

impl SynthesisStage for WriteStage {
    fn name(&self) -> &str {
        "Write"
    }

    fn validate_input(&self, ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        if !state.has_project() {
            return Err(StageError::invalid_input("No project graph to write"));
        }
        if !ctx.media.path.is_file() {
            return Err(StageError::invalid_input(format!(
                "Source media not found: {}",
                ctx.media.path.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut SynthesisState) -> StageResult<()> {
        let project = state
            .project
            .as_ref()
            .ok_or_else(|| StageError::invalid_input("No project graph to write"))?;

        let writer = ProjectWriter::new(&ctx.settings.paths.projects_root);
        let project_dir = writer.write(project, &ctx.media)?;

        ctx.logger
            .info(&format!("Project written to {}", project_dir.display()));

        state.project_dir = Some(project_dir);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &SynthesisState) -> StageResult<()> {
        match &state.project_dir {
            Some(dir) if dir.is_dir() => Ok(()),
            Some(dir) => Err(StageError::invalid_output(format!(
                "Project directory missing after write: {}",
                dir.display()
            ))),
            None => Err(StageError::invalid_output("Project directory not recorded")),
        }
    }
}
