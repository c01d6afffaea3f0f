//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates. Settings are always passed in explicitly; nothing in the
//! library reads configuration from ambient scope.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Timeline layout settings.
    #[serde(default)]
    pub timeline: TimelineSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for project output and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root folder new project directories are created under.
    #[serde(default = "default_projects_root")]
    pub projects_root: String,

    /// Folder for per-run log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_projects_root() -> String {
    "reel_projects".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            projects_root: default_projects_root(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Timeline layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSettings {
    /// Blank interval inserted between consecutive reels, in seconds.
    #[serde(default = "default_gap_seconds")]
    pub gap_between_reels_seconds: u32,

    /// Maximum total reel duration, in seconds. Longer reels are rejected.
    #[serde(default = "default_max_reel_seconds")]
    pub max_reel_duration_seconds: u32,
}

fn default_gap_seconds() -> u32 {
    10
}

fn default_max_reel_seconds() -> u32 {
    58
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            gap_between_reels_seconds: default_gap_seconds(),
            max_reel_duration_seconds: default_max_reel_seconds(),
        }
    }
}

impl TimelineSettings {
    /// Inter-reel gap in microseconds.
    pub fn gap_us(&self) -> u64 {
        u64::from(self.gap_between_reels_seconds) * 1_000_000
    }

    /// Maximum reel duration in microseconds.
    pub fn max_reel_us(&self) -> u64 {
        u64::from(self.max_reel_duration_seconds) * 1_000_000
    }
}

/// Logging configuration persisted alongside the other sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Use compact log output (filter progress to step intervals).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Progress update step percentage.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,

    /// Show timestamps in log output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            progress_step: default_progress_step(),
            show_timestamps: true,
        }
    }
}

/// Identifies one settings section for section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Timeline,
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Timeline => "timeline",
            ConfigSection::Logging => "logging",
        }
    }
}
