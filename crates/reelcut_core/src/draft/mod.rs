//! Draft document schema, project directory writing, and auditing.

pub mod audit;
mod error;
mod schema;
mod writer;

pub use audit::{audit_draft, AuditFinding, AuditReport};
pub use error::{ProjectWriteError, ProjectWriteResult};
pub use schema::{
    CanvasConfig, DraftDocument, DraftMaterials, DraftSegment, DraftTimerange, DraftTrack,
    DraftVideo, DRAFT_FILE_NAME, SCHEMA_VERSION,
};
pub use writer::ProjectWriter;
