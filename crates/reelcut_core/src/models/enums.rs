//! Core enums used throughout the library.

use serde::{Deserialize, Serialize};

/// Type of timeline track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Video,
    Audio,
}

impl std::fmt::Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackType::Video => write!(f, "video"),
            TrackType::Audio => write!(f, "audio"),
        }
    }
}

/// Narrative role of a cue within a reel.
///
/// Labels come from the free text of the cue sheet ("HOOK", "context", ...).
/// Unlabeled cues are `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueLabel {
    /// Attention-grabbing opening moment.
    Hook,
    /// Setup so viewers understand the hook.
    Context,
    /// The resolution or insight the reel builds toward.
    Payoff,
    /// No recognized label.
    #[default]
    Other,
}

impl CueLabel {
    /// Match a single label token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("hook") {
            Some(CueLabel::Hook)
        } else if token.eq_ignore_ascii_case("context") {
            Some(CueLabel::Context)
        } else if token.eq_ignore_ascii_case("payoff") {
            Some(CueLabel::Payoff)
        } else {
            None
        }
    }
}

impl std::fmt::Display for CueLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueLabel::Hook => write!(f, "hook"),
            CueLabel::Context => write!(f, "context"),
            CueLabel::Payoff => write!(f, "payoff"),
            CueLabel::Other => write!(f, "other"),
        }
    }
}
