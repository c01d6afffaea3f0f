//! Project writing errors.

use std::path::PathBuf;

/// Errors raised while materializing a project directory.
///
/// Any of these aborts the whole write; the staging directory is removed so
/// no partial project is left behind.
#[derive(Debug, thiserror::Error)]
pub enum ProjectWriteError {
    /// Failed to create the projects root or staging directory.
    #[error("Failed to create project directory '{path}': {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to copy the source media into the project.
    #[error("Failed to copy media '{src}' to '{dest}': {source}")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        source: std::io::Error,
    },

    /// The media path has no usable file name.
    #[error("Media path '{0}' has no file name")]
    BadMediaPath(PathBuf),

    /// Failed to serialize the project description.
    #[error("Failed to serialize project description: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the project description file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to move the finished project into place.
    #[error("Failed to commit project to '{path}': {source}")]
    CommitFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ProjectWriteError {
    /// Create a directory-creation error.
    pub fn create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a media-copy error.
    pub fn copy(
        src: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CopyFailed {
            src: src.into(),
            dest: dest.into(),
            source,
        }
    }

    /// Create a file-write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a commit (rename) error.
    pub fn commit(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CommitFailed {
            path: path.into(),
            source,
        }
    }
}

/// Result type for project writing.
pub type ProjectWriteResult<T> = Result<T, ProjectWriteError>;
