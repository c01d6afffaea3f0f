//! Draft document schema (serde structs).
//!
//! The on-disk project description consumed by the editing application.
//! The schema is an externally versioned contract; this module targets one
//! pinned version and keeps the field set byte-compatible with it. Output
//! is validated against a fixed reference structure in tests, not against
//! the application itself.

use serde::{Deserialize, Serialize};

use crate::models::{Project, Segment, TrackType};

/// Pinned draft schema version.
pub const SCHEMA_VERSION: &str = "7.7.0";

/// File name of the project description inside a project directory.
pub const DRAFT_FILE_NAME: &str = "draft_content.json";

/// Material frame dimensions recorded for source videos.
const MATERIAL_WIDTH: u32 = 1920;
const MATERIAL_HEIGHT: u32 = 1080;

/// Output canvas: portrait short-form video.
const CANVAS_WIDTH: u32 = 1080;
const CANVAS_HEIGHT: u32 = 1920;
const CANVAS_RATIO: &str = "9:16";

/// A `{start, duration}` pair in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTimerange {
    pub start: u64,
    pub duration: u64,
}

/// One placed clip within a draft track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSegment {
    pub id: String,
    pub material_id: String,
    #[serde(default)]
    pub render_index: usize,
    pub source_timerange: DraftTimerange,
    pub target_timerange: DraftTimerange,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_speed() -> f64 {
    1.0
}

fn default_volume() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

/// One draft timeline track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftTrack {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TrackType,
    pub segments: Vec<DraftSegment>,
}

/// A source video entry in the materials list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftVideo {
    pub id: String,
    /// Path relative to the project directory, forward slashes.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u64,
    pub width: u32,
    pub height: u32,
}

/// The materials catalogue of a draft.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DraftMaterials {
    pub videos: Vec<DraftVideo>,
    #[serde(default)]
    pub audios: Vec<serde_json::Value>,
    #[serde(default)]
    pub images: Vec<serde_json::Value>,
    #[serde(default)]
    pub texts: Vec<serde_json::Value>,
}

/// Canvas configuration of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub ratio: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            ratio: CANVAS_RATIO.to_string(),
        }
    }
}

/// The complete draft document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftDocument {
    pub version: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub platform: String,
    pub create_time: i64,
    /// Total timeline duration in microseconds.
    pub duration: u64,
    pub name: String,
    pub materials: DraftMaterials,
    pub tracks: Vec<DraftTrack>,
    #[serde(rename = "canvasConfig", default)]
    pub canvas_config: CanvasConfig,
}

impl DraftDocument {
    /// Build the draft document for a synthesized project.
    ///
    /// `media_rel_path` is the media file's path relative to the project
    /// directory (normally just its file name), so written projects stay
    /// relocatable.
    pub fn from_project(project: &Project, media_rel_path: &str) -> Self {
        let videos = project
            .materials
            .iter()
            .map(|m| DraftVideo {
                id: m.id.clone(),
                path: media_rel_path.replace('\\', "/"),
                kind: "video".to_string(),
                duration: m.duration_us,
                width: MATERIAL_WIDTH,
                height: MATERIAL_HEIGHT,
            })
            .collect();

        let tracks = project
            .tracks
            .iter()
            .map(|t| DraftTrack {
                id: t.id.clone(),
                kind: t.kind,
                segments: t
                    .segments
                    .iter()
                    .enumerate()
                    .map(|(i, s)| DraftSegment::from_segment(s, i))
                    .collect(),
            })
            .collect();

        Self {
            version: SCHEMA_VERSION.to_string(),
            id: project.id.clone(),
            kind: "draft".to_string(),
            platform: std::env::consts::OS.to_string(),
            create_time: chrono::Utc::now().timestamp(),
            duration: project.total_duration_us,
            name: project.name.clone(),
            materials: DraftMaterials {
                videos,
                ..DraftMaterials::default()
            },
            tracks,
            canvas_config: CanvasConfig::default(),
        }
    }
}

impl DraftSegment {
    fn from_segment(segment: &Segment, render_index: usize) -> Self {
        Self {
            id: segment.id.clone(),
            material_id: segment.material_id.clone(),
            render_index,
            source_timerange: DraftTimerange {
                start: segment.source.start_us,
                duration: segment.source.len_us(),
            },
            target_timerange: DraftTimerange {
                start: segment.target.start_us,
                duration: segment.target.len_us(),
            },
            speed: default_speed(),
            volume: default_volume(),
            visible: default_visible(),
        }
    }
}
