//! Cue sheet parsing errors.

/// Errors raised while parsing a cue sheet.
///
/// All carry the 1-based line number and the ordinal of the reel block the
/// line belongs to, so the host can point the user at the offending input.
/// Parse errors are fatal to the whole sheet; per-reel validation problems
/// are handled later by the planner as recoverable diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum CueSheetError {
    /// The start or end field of a cue line is not a recognizable timecode.
    #[error("Malformed timecode at line {line} (reel {block}): '{value}'")]
    MalformedTimecode {
        line: usize,
        block: usize,
        value: String,
    },

    /// A cue ends at or before its own start.
    #[error("Cue at line {line} (reel {block}) ends at or before its start: {start} -> {end}")]
    InvertedSpan {
        line: usize,
        block: usize,
        start: String,
        end: String,
    },
}

impl CueSheetError {
    /// Create a malformed timecode error.
    pub fn malformed(line: usize, block: usize, value: impl Into<String>) -> Self {
        Self::MalformedTimecode {
            line,
            block,
            value: value.into(),
        }
    }

    /// Create an inverted span error.
    pub fn inverted(
        line: usize,
        block: usize,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self::InvertedSpan {
            line,
            block,
            start: start.into(),
            end: end.into(),
        }
    }

    /// The 1-based line number the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedTimecode { line, .. } | Self::InvertedSpan { line, .. } => *line,
        }
    }
}

/// Result type for cue sheet parsing.
pub type CueSheetResult<T> = Result<T, CueSheetError>;
