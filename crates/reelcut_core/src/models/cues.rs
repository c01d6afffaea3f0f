//! Cue and reel data structures.
//!
//! A `Cue` is one labeled source-time interval destined for a reel; a `Reel`
//! is an ordered set of cues forming one short output clip. Both are
//! transient: they are built from the cue sheet, validated by the planner,
//! and discarded once the timeline has been synthesized.

use serde::{Deserialize, Serialize};

use super::enums::CueLabel;

/// A half-open time interval in microseconds: `[start_us, end_us)`.
///
/// Invariant: `end_us > start_us`. Constructed spans are never empty; the
/// parser and planner reject empty or inverted intervals before a `TimeSpan`
/// is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start offset in microseconds.
    pub start_us: u64,
    /// End offset in microseconds (exclusive).
    pub end_us: u64,
}

impl TimeSpan {
    /// Create a span. Returns `None` if `end_us <= start_us`.
    pub fn new(start_us: u64, end_us: u64) -> Option<Self> {
        if end_us > start_us {
            Some(Self { start_us, end_us })
        } else {
            None
        }
    }

    /// Span length in microseconds.
    pub fn len_us(&self) -> u64 {
        self.end_us - self.start_us
    }

    /// Intersect with `[0, limit_us)`.
    ///
    /// Returns `None` when the span lies entirely at or beyond `limit_us`
    /// (the intersection would be empty).
    pub fn clip_to(&self, limit_us: u64) -> Option<Self> {
        TimeSpan::new(self.start_us.min(limit_us), self.end_us.min(limit_us))
    }

    /// Span length in seconds (for display only).
    pub fn len_secs(&self) -> f64 {
        self.len_us() as f64 / 1_000_000.0
    }
}

/// One labeled source-time interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Source interval to extract.
    pub span: TimeSpan,
    /// Narrative role within the reel.
    pub label: CueLabel,
    /// Free-text commentary from the cue sheet.
    pub comment: String,
}

impl Cue {
    /// Create a cue with the given span.
    pub fn new(span: TimeSpan) -> Self {
        Self {
            span,
            label: CueLabel::Other,
            comment: String::new(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: CueLabel) -> Self {
        self.label = label;
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// An ordered set of cues forming one short output clip.
///
/// Cue order is whatever order the cue sheet listed them in; cues may
/// reference source time non-monotonically (a hook can come from later in
/// the source than the context that follows it in the reel).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reel {
    /// Cues in play order.
    pub cues: Vec<Cue>,
}

impl Reel {
    /// Create a reel from cues.
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    /// Total playback duration: the sum of cue span lengths.
    pub fn duration_us(&self) -> u64 {
        self.cues.iter().map(|c| c.span.len_us()).sum()
    }

    /// Number of cues.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the reel has no cues.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_rejects_inverted_and_empty() {
        assert!(TimeSpan::new(5, 5).is_none());
        assert!(TimeSpan::new(10, 5).is_none());
        assert!(TimeSpan::new(5, 10).is_some());
    }

    #[test]
    fn span_length() {
        let span = TimeSpan::new(1_000_000, 6_000_000).unwrap();
        assert_eq!(span.len_us(), 5_000_000);
        assert!((span.len_secs() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clip_keeps_partial_overlap() {
        let span = TimeSpan::new(25_000_000, 40_000_000).unwrap();
        let clipped = span.clip_to(30_000_000).unwrap();
        assert_eq!(clipped.start_us, 25_000_000);
        assert_eq!(clipped.end_us, 30_000_000);
    }

    #[test]
    fn clip_drops_span_beyond_limit() {
        let span = TimeSpan::new(40_000_000, 50_000_000).unwrap();
        assert!(span.clip_to(30_000_000).is_none());
        // Exactly at the limit is also empty
        let edge = TimeSpan::new(30_000_000, 50_000_000).unwrap();
        assert!(edge.clip_to(30_000_000).is_none());
    }

    #[test]
    fn reel_duration_sums_cues() {
        let reel = Reel::new(vec![
            Cue::new(TimeSpan::new(0, 5_000_000).unwrap()),
            Cue::new(TimeSpan::new(60_000_000, 70_000_000).unwrap()),
        ]);
        assert_eq!(reel.duration_us(), 15_000_000);
    }
}
