//! Draft document auditor.
//!
//! Re-checks a written (or foreign) draft against the timeline invariants:
//! segment ordering and overlap, source ranges within material bounds,
//! declared-vs-computed duration, and material references. Also reports the
//! inter-segment gap layout so spacing problems are visible at a glance.

use std::collections::HashMap;

use crate::models::TrackType;

use super::schema::{DraftDocument, DraftTrack};

/// One invariant violation found in a draft.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuditFinding {
    /// Segment starts do not strictly increase, or neighbors overlap.
    #[error("{track} track: segment {index} overlaps or precedes its neighbor")]
    OverlappingSegments { track: TrackType, index: usize },

    /// A segment's source and target durations differ.
    #[error("{track} track: segment {index} source/target durations differ")]
    TimerangeMismatch { track: TrackType, index: usize },

    /// A segment extracts past the end of its material.
    #[error("{track} track: segment {index} reads past the end of material {material_id}")]
    SourceOutOfBounds {
        track: TrackType,
        index: usize,
        material_id: String,
    },

    /// A segment references a material not present in the catalogue.
    #[error("{track} track: segment {index} references unknown material {material_id}")]
    UnknownMaterial {
        track: TrackType,
        index: usize,
        material_id: String,
    },

    /// Declared total duration disagrees with the computed track ends.
    #[error("Declared duration {declared}us differs from computed {computed}us")]
    DurationMismatch { declared: u64, computed: u64 },
}

/// Audit results for one draft document.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    /// Invariant violations, empty for a healthy draft.
    pub findings: Vec<AuditFinding>,
    /// Total number of segments across all tracks.
    pub segment_count: usize,
    /// Inter-segment gaps on the video track, in microseconds.
    pub video_gaps_us: Vec<u64>,
}

/// Check a draft document against the timeline invariants.
pub fn audit_draft(document: &DraftDocument) -> AuditReport {
    let mut report = AuditReport::default();

    let material_durations: HashMap<&str, u64> = document
        .materials
        .videos
        .iter()
        .map(|v| (v.id.as_str(), v.duration))
        .collect();

    let mut computed_end: u64 = 0;

    for track in &document.tracks {
        report.segment_count += track.segments.len();
        audit_track(track, &material_durations, &mut report.findings);

        if let Some(last) = track.segments.last() {
            computed_end =
                computed_end.max(last.target_timerange.start + last.target_timerange.duration);
        }

        if track.kind == TrackType::Video {
            report.video_gaps_us = track_gaps(track);
        }
    }

    if document.duration != computed_end {
        report.findings.push(AuditFinding::DurationMismatch {
            declared: document.duration,
            computed: computed_end,
        });
    }

    report
}

fn audit_track(
    track: &DraftTrack,
    material_durations: &HashMap<&str, u64>,
    findings: &mut Vec<AuditFinding>,
) {
    for (index, segment) in track.segments.iter().enumerate() {
        if segment.source_timerange.duration != segment.target_timerange.duration {
            findings.push(AuditFinding::TimerangeMismatch {
                track: track.kind,
                index,
            });
        }

        match material_durations.get(segment.material_id.as_str()) {
            None => findings.push(AuditFinding::UnknownMaterial {
                track: track.kind,
                index,
                material_id: segment.material_id.clone(),
            }),
            Some(&duration) => {
                if segment.source_timerange.start + segment.source_timerange.duration > duration {
                    findings.push(AuditFinding::SourceOutOfBounds {
                        track: track.kind,
                        index,
                        material_id: segment.material_id.clone(),
                    });
                }
            }
        }

        if index > 0 {
            let prev = &track.segments[index - 1];
            let prev_end = prev.target_timerange.start + prev.target_timerange.duration;
            if segment.target_timerange.start < prev_end
                || segment.target_timerange.start <= prev.target_timerange.start
            {
                findings.push(AuditFinding::OverlappingSegments {
                    track: track.kind,
                    index,
                });
            }
        }
    }
}

/// Gaps between consecutive segments on a track.
fn track_gaps(track: &DraftTrack) -> Vec<u64> {
    track
        .segments
        .windows(2)
        .map(|w| {
            let prev_end = w[0].target_timerange.start + w[0].target_timerange.duration;
            w[1].target_timerange.start.saturating_sub(prev_end)
        })
        .collect()
}
