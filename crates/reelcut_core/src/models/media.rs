//! Source media description.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Externally probed facts about the source media file.
///
/// Duration and stream layout come from the host's media inspection; the
/// core never probes files itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the source file.
    pub path: PathBuf,
    /// Total duration in microseconds.
    pub duration_us: u64,
    /// Whether the file carries an audio stream.
    #[serde(default = "default_has_audio")]
    pub has_audio: bool,
}

fn default_has_audio() -> bool {
    true
}

impl MediaInfo {
    /// Create a media description.
    pub fn new(path: impl Into<PathBuf>, duration_us: u64) -> Self {
        Self {
            path: path.into(),
            duration_us,
            has_audio: true,
        }
    }

    /// Set whether the media carries an audio stream.
    pub fn with_audio(mut self, has_audio: bool) -> Self {
        self.has_audio = has_audio;
        self
    }

    /// The file name component of the media path.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// The file stem, used as the default project name.
    pub fn file_stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|n| n.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_and_stem() {
        let media = MediaInfo::new("/videos/talk_ep12.mp4", 1_800_000_000);
        assert_eq!(media.file_name(), Some("talk_ep12.mp4"));
        assert_eq!(media.file_stem(), Some("talk_ep12"));
        assert!(media.has_audio);
    }

    #[test]
    fn audio_flag_builder() {
        let media = MediaInfo::new("a.mp4", 1).with_audio(false);
        assert!(!media.has_audio);
    }
}
