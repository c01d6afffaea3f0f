//! The project identifier graph: materials, segments, tracks, project.
//!
//! Constructed once by the timeline synthesizer and immutable from then on;
//! the project writer owns the serialized form on disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cues::TimeSpan;
use super::enums::TrackType;
use super::media::MediaInfo;

/// Generate a fresh identifier for a graph node.
///
/// Uppercase hyphenated v4 UUID, matching the draft schema convention.
/// Identifiers are unique within one project's scope; no central registry
/// is needed.
pub fn new_id() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

/// A distinct source media file referenced by segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier within the project.
    pub id: String,
    /// Path of the original source file.
    pub source_path: PathBuf,
    /// Media duration in microseconds.
    pub duration_us: u64,
}

impl Material {
    /// Create a material for the given media, with a fresh id.
    pub fn from_media(media: &MediaInfo) -> Self {
        Self {
            id: new_id(),
            source_path: media.path.clone(),
            duration_us: media.duration_us,
        }
    }
}

/// A placed clip on a timeline track.
///
/// Carries both the source extraction range and the output placement range;
/// the two are independent, only target placement is monotonic on a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique identifier within the project.
    pub id: String,
    /// Id of the material this segment extracts from.
    pub material_id: String,
    /// Which portion of the material to play.
    pub source: TimeSpan,
    /// Where the segment sits on the output timeline.
    pub target: TimeSpan,
}

impl Segment {
    /// Create a segment with a fresh id.
    pub fn new(material_id: impl Into<String>, source: TimeSpan, target: TimeSpan) -> Self {
        Self {
            id: new_id(),
            material_id: material_id.into(),
            source,
            target,
        }
    }
}

/// An ordered layer of segments.
///
/// Segments are strictly ordered by `target.start_us` and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier within the project.
    pub id: String,
    /// Track layer type.
    pub kind: TrackType,
    /// Segments in timeline order.
    pub segments: Vec<Segment>,
}

impl Track {
    /// Create an empty track with a fresh id.
    pub fn new(kind: TrackType) -> Self {
        Self {
            id: new_id(),
            kind,
            segments: Vec::new(),
        }
    }

    /// End of the last segment, or 0 for an empty track.
    pub fn end_us(&self) -> u64 {
        self.segments.last().map(|s| s.target.end_us).unwrap_or(0)
    }

    /// Check that segments are strictly increasing in target start and
    /// pairwise non-overlapping.
    pub fn is_well_formed(&self) -> bool {
        self.segments
            .windows(2)
            .all(|w| w[0].target.end_us <= w[1].target.start_us)
    }
}

/// The complete synthesized project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier; also names the on-disk project directory.
    pub id: String,
    /// Human-facing project name.
    pub name: String,
    /// Distinct source materials.
    pub materials: Vec<Material>,
    /// Timeline tracks.
    pub tracks: Vec<Track>,
    /// End of the last segment on the longest track, in microseconds.
    pub total_duration_us: u64,
}

impl Project {
    /// The track of the given type, if present.
    pub fn track(&self, kind: TrackType) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind == kind)
    }

    /// Total number of segments across all tracks.
    pub fn segment_count(&self) -> usize {
        self.tracks.iter().map(|t| t.segments.len()).sum()
    }
}
