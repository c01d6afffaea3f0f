//! Reel planner: validates parsed reels against the source media and the
//! configured duration limit.
//!
//! Validation failures are recovered locally: the offending reel is
//! excluded and reported as a diagnostic, so a partially successful run
//! still yields a usable project. The planner never reorders reels or cues.

use crate::config::TimelineSettings;
use crate::cues::format_timecode_us;
use crate::models::{Cue, MediaInfo, Reel, TimeSpan};

/// A recoverable per-reel validation problem.
///
/// Reel and cue ordinals are 1-based, matching the cue sheet the user wrote.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanDiagnostic {
    /// A cue lies entirely outside the known media duration.
    #[error(
        "Reel {reel} skipped: cue {cue} ({start} -> {end}) is beyond the media end ({media_end})"
    )]
    OutOfRangeCue {
        reel: usize,
        cue: usize,
        start: String,
        end: String,
        media_end: String,
    },

    /// A reel's total duration exceeds the configured maximum.
    #[error("Reel {reel} rejected: {duration_secs}s exceeds the {max_secs}s maximum")]
    ReelTooLong {
        reel: usize,
        duration_secs: u64,
        max_secs: u64,
    },

    /// A reel had no cues left after clipping.
    #[error("Reel {reel} skipped: no cues remain after clipping")]
    EmptyReel { reel: usize },
}

impl PlanDiagnostic {
    fn out_of_range(reel: usize, cue: usize, span: TimeSpan, media: &MediaInfo) -> Self {
        Self::OutOfRangeCue {
            reel,
            cue,
            start: format_timecode_us(span.start_us),
            end: format_timecode_us(span.end_us),
            media_end: format_timecode_us(media.duration_us),
        }
    }
}

/// The validated, ordered reels plus everything that was excluded.
#[derive(Debug, Clone, Default)]
pub struct ReelPlan {
    /// Reels that passed validation, in input order, cue spans clipped to
    /// the media bounds.
    pub reels: Vec<Reel>,
    /// One entry per excluded reel.
    pub diagnostics: Vec<PlanDiagnostic>,
}

impl ReelPlan {
    /// Total playback duration of the surviving reels (without gaps).
    pub fn content_duration_us(&self) -> u64 {
        self.reels.iter().map(|r| r.duration_us()).sum()
    }
}

/// Validate parsed reels against the media bounds and duration limit.
///
/// Cue spans partially past the media end are clipped; a cue entirely
/// outside the media skips its whole reel (a reel missing one of its
/// narrative beats is not worth emitting). Overlong reels are rejected,
/// never truncated.
pub fn plan_reels(parsed: Vec<Reel>, media: &MediaInfo, limits: &TimelineSettings) -> ReelPlan {
    let mut plan = ReelPlan::default();

    'reels: for (idx, reel) in parsed.into_iter().enumerate() {
        let reel_no = idx + 1;

        let mut clipped: Vec<Cue> = Vec::with_capacity(reel.len());
        for (cue_idx, cue) in reel.cues.into_iter().enumerate() {
            match cue.span.clip_to(media.duration_us) {
                Some(span) => clipped.push(Cue { span, ..cue }),
                None => {
                    plan.diagnostics.push(PlanDiagnostic::out_of_range(
                        reel_no,
                        cue_idx + 1,
                        cue.span,
                        media,
                    ));
                    continue 'reels;
                }
            }
        }

        if clipped.is_empty() {
            plan.diagnostics
                .push(PlanDiagnostic::EmptyReel { reel: reel_no });
            continue;
        }

        let reel = Reel::new(clipped);
        let duration_us = reel.duration_us();
        if duration_us > limits.max_reel_us() {
            plan.diagnostics.push(PlanDiagnostic::ReelTooLong {
                reel: reel_no,
                duration_secs: duration_us / 1_000_000,
                max_secs: limits.max_reel_us() / 1_000_000,
            });
            continue;
        }

        plan.reels.push(reel);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSpan;

    fn media(duration_secs: u64) -> MediaInfo {
        MediaInfo::new("/videos/source.mp4", duration_secs * 1_000_000)
    }

    fn limits() -> TimelineSettings {
        TimelineSettings::default()
    }

    fn reel(spans: &[(u64, u64)]) -> Reel {
        Reel::new(
            spans
                .iter()
                .map(|&(s, e)| {
                    Cue::new(TimeSpan::new(s * 1_000_000, e * 1_000_000).unwrap())
                })
                .collect(),
        )
    }

    #[test]
    fn accepts_reels_within_limit_unchanged() {
        let plan = plan_reels(
            vec![reel(&[(930, 935), (60, 70)]), reel(&[(1200, 1205)])],
            &media(1800),
            &limits(),
        );

        assert_eq!(plan.reels.len(), 2);
        assert!(plan.diagnostics.is_empty());
        assert_eq!(plan.reels[0].duration_us(), 15_000_000);
        assert_eq!(plan.content_duration_us(), 20_000_000);
    }

    #[test]
    fn accepts_duration_exactly_at_maximum() {
        let plan = plan_reels(vec![reel(&[(0, 58)])], &media(1800), &limits());
        assert_eq!(plan.reels.len(), 1);
        assert!(plan.diagnostics.is_empty());
    }

    #[test]
    fn rejects_overlong_reel_without_truncating() {
        let plan = plan_reels(
            vec![reel(&[(0, 30), (100, 130)]), reel(&[(200, 205)])],
            &media(1800),
            &limits(),
        );

        assert_eq!(plan.reels.len(), 1);
        assert_eq!(plan.reels[0].duration_us(), 5_000_000);
        assert_eq!(plan.diagnostics.len(), 1);
        match &plan.diagnostics[0] {
            PlanDiagnostic::ReelTooLong {
                reel,
                duration_secs,
                max_secs,
            } => {
                assert_eq!(*reel, 1);
                assert_eq!(*duration_secs, 60);
                assert_eq!(*max_secs, 58);
            }
            other => panic!("unexpected diagnostic: {other}"),
        }
    }

    #[test]
    fn clips_cue_overlapping_media_end() {
        // A 60s cue against a 30s source is clipped to [0, 30)
        let plan = plan_reels(vec![reel(&[(0, 60)])], &media(30), &limits());

        assert_eq!(plan.reels.len(), 1);
        assert!(plan.diagnostics.is_empty());
        let span = plan.reels[0].cues[0].span;
        assert_eq!(span.start_us, 0);
        assert_eq!(span.end_us, 30_000_000);
    }

    #[test]
    fn skips_reel_with_cue_entirely_out_of_range() {
        let plan = plan_reels(
            vec![reel(&[(10, 15), (40, 50)]), reel(&[(0, 5)])],
            &media(30),
            &limits(),
        );

        assert_eq!(plan.reels.len(), 1);
        assert_eq!(plan.reels[0].cues[0].span.start_us, 0);
        assert_eq!(plan.diagnostics.len(), 1);
        match &plan.diagnostics[0] {
            PlanDiagnostic::OutOfRangeCue { reel, cue, .. } => {
                assert_eq!(*reel, 1);
                assert_eq!(*cue, 2);
            }
            other => panic!("unexpected diagnostic: {other}"),
        }
    }

    #[test]
    fn diagnostic_messages_carry_timecodes() {
        let plan = plan_reels(vec![reel(&[(40, 50)])], &media(30), &limits());
        let message = plan.diagnostics[0].to_string();
        assert!(message.contains("00:00:40"));
        assert!(message.contains("00:00:30"));
    }

    #[test]
    fn empty_input_plans_to_empty_output() {
        let plan = plan_reels(Vec::new(), &media(1800), &limits());
        assert!(plan.reels.is_empty());
        assert!(plan.diagnostics.is_empty());
    }

    #[test]
    fn preserves_reel_order() {
        let plan = plan_reels(
            vec![reel(&[(100, 105)]), reel(&[(0, 5)]), reel(&[(50, 55)])],
            &media(1800),
            &limits(),
        );
        let starts: Vec<u64> = plan
            .reels
            .iter()
            .map(|r| r.cues[0].span.start_us / 1_000_000)
            .collect();
        assert_eq!(starts, vec![100, 0, 50]);
    }
}
