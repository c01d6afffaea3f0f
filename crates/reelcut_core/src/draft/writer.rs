//! Project directory writer.
//!
//! Materializes a synthesized project as an on-disk artifact: a directory
//! named by the project id containing a verbatim copy of the source media
//! and the serialized draft document.
//!
//! Writing is all-or-nothing. Everything is staged into a hidden sibling
//! directory; the draft file itself goes through a temp-file-plus-rename,
//! and the staging directory is renamed to its final name only once every
//! step has succeeded. On any failure the staging directory is removed, so
//! a reader never observes a half-written project.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{MediaInfo, Project};

use super::error::{ProjectWriteError, ProjectWriteResult};
use super::schema::{DraftDocument, DRAFT_FILE_NAME};

/// Writes project directories under a configured root.
pub struct ProjectWriter {
    projects_root: PathBuf,
}

impl ProjectWriter {
    /// Create a writer rooted at the given directory.
    pub fn new(projects_root: impl Into<PathBuf>) -> Self {
        Self {
            projects_root: projects_root.into(),
        }
    }

    /// The configured projects root.
    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    /// Materialize `project` on disk and return the project directory path.
    pub fn write(&self, project: &Project, media: &MediaInfo) -> ProjectWriteResult<PathBuf> {
        fs::create_dir_all(&self.projects_root)
            .map_err(|e| ProjectWriteError::create(&self.projects_root, e))?;

        let staging = self
            .projects_root
            .join(format!(".{}.partial", project.id));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| ProjectWriteError::create(&staging, e))?;
        }
        fs::create_dir(&staging).map_err(|e| ProjectWriteError::create(&staging, e))?;

        match self.stage(project, media, &staging) {
            Ok(()) => {}
            Err(e) => {
                let _ = fs::remove_dir_all(&staging);
                return Err(e);
            }
        }

        let final_dir = self.projects_root.join(&project.id);
        if let Err(e) = fs::rename(&staging, &final_dir) {
            let _ = fs::remove_dir_all(&staging);
            return Err(ProjectWriteError::commit(&final_dir, e));
        }

        Ok(final_dir)
    }

    /// Populate the staging directory: media copy plus draft document.
    fn stage(&self, project: &Project, media: &MediaInfo, staging: &Path) -> ProjectWriteResult<()> {
        let file_name = media
            .file_name()
            .ok_or_else(|| ProjectWriteError::BadMediaPath(media.path.clone()))?;

        let media_dest = staging.join(file_name);
        fs::copy(&media.path, &media_dest)
            .map_err(|e| ProjectWriteError::copy(&media.path, &media_dest, e))?;

        let document = DraftDocument::from_project(project, file_name);
        let json = serde_json::to_string_pretty(&document)?;

        let draft_path = staging.join(DRAFT_FILE_NAME);
        atomic_write(&draft_path, json.as_bytes())?;

        Ok(())
    }
}

/// Write bytes to `path` via a temp file in the same directory plus rename.
fn atomic_write(path: &Path, bytes: &[u8]) -> ProjectWriteResult<()> {
    let temp_path = path.with_extension("json.tmp");

    {
        let mut file =
            fs::File::create(&temp_path).map_err(|e| ProjectWriteError::write(&temp_path, e))?;
        file.write_all(bytes)
            .map_err(|e| ProjectWriteError::write(&temp_path, e))?;
        file.sync_all()
            .map_err(|e| ProjectWriteError::write(&temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| ProjectWriteError::commit(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimelineSettings;
    use crate::draft::audit::audit_draft;
    use crate::models::{Cue, Reel, TimeSpan};
    use crate::timeline::synthesize;
    use tempfile::tempdir;

    fn write_sample_media(dir: &Path) -> PathBuf {
        let path = dir.join("talk.mp4");
        fs::write(&path, b"not really mpeg4 but good enough").unwrap();
        path
    }

    fn sample_reels() -> Vec<Reel> {
        vec![
            Reel::new(vec![
                Cue::new(TimeSpan::new(930_000_000, 935_000_000).unwrap()),
                Cue::new(TimeSpan::new(60_000_000, 70_000_000).unwrap()),
            ]),
            Reel::new(vec![Cue::new(
                TimeSpan::new(1_200_000_000, 1_205_000_000).unwrap(),
            )]),
        ]
    }

    #[test]
    fn writes_project_directory_named_by_id() {
        let dir = tempdir().unwrap();
        let media_path = write_sample_media(dir.path());
        let media = MediaInfo::new(&media_path, 1_800_000_000);
        let project = synthesize(&sample_reels(), &media, &TimelineSettings::default(), "talk");

        let root = dir.path().join("projects");
        let project_dir = ProjectWriter::new(&root).write(&project, &media).unwrap();

        assert_eq!(project_dir, root.join(&project.id));
        assert!(project_dir.join("talk.mp4").is_file());
        assert!(project_dir.join(DRAFT_FILE_NAME).is_file());
    }

    #[test]
    fn copies_media_byte_for_byte() {
        let dir = tempdir().unwrap();
        let media_path = write_sample_media(dir.path());
        let media = MediaInfo::new(&media_path, 1_800_000_000);
        let project = synthesize(&sample_reels(), &media, &TimelineSettings::default(), "talk");

        let project_dir = ProjectWriter::new(dir.path().join("projects"))
            .write(&project, &media)
            .unwrap();

        let original = fs::read(&media_path).unwrap();
        let copied = fs::read(project_dir.join("talk.mp4")).unwrap();
        assert_eq!(original, copied);
        // The original stays in place
        assert!(media_path.is_file());
    }

    #[test]
    fn written_draft_parses_and_passes_audit() {
        let dir = tempdir().unwrap();
        let media_path = write_sample_media(dir.path());
        let media = MediaInfo::new(&media_path, 1_800_000_000);
        let project = synthesize(&sample_reels(), &media, &TimelineSettings::default(), "talk");

        let project_dir = ProjectWriter::new(dir.path().join("projects"))
            .write(&project, &media)
            .unwrap();

        let json = fs::read_to_string(project_dir.join(DRAFT_FILE_NAME)).unwrap();
        let document: DraftDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(document.id, project.id);
        assert_eq!(document.duration, project.total_duration_us);

        let report = audit_draft(&document);
        assert!(report.findings.is_empty(), "{:?}", report.findings);
    }

    #[test]
    fn missing_media_leaves_no_partial_directory() {
        let dir = tempdir().unwrap();
        let media = MediaInfo::new(dir.path().join("missing.mp4"), 1_800_000_000);
        let project = synthesize(&sample_reels(), &media, &TimelineSettings::default(), "talk");

        let root = dir.path().join("projects");
        let err = ProjectWriter::new(&root).write(&project, &media).unwrap_err();
        assert!(matches!(err, ProjectWriteError::CopyFailed { .. }));

        // The root exists but holds no residue at all
        let entries: Vec<_> = fs::read_dir(&root).unwrap().collect();
        assert!(entries.is_empty(), "{entries:?}");
    }

    #[test]
    fn media_path_without_file_name_is_rejected() {
        let dir = tempdir().unwrap();
        let media = MediaInfo::new("/", 1_800_000_000);
        let project = synthesize(&[], &media, &TimelineSettings::default(), "talk");

        let err = ProjectWriter::new(dir.path().join("projects"))
            .write(&project, &media)
            .unwrap_err();
        assert!(matches!(err, ProjectWriteError::BadMediaPath(_)));
    }

    #[test]
    fn empty_project_still_writes_valid_draft() {
        let dir = tempdir().unwrap();
        let media_path = write_sample_media(dir.path());
        let media = MediaInfo::new(&media_path, 1_800_000_000);
        let project = synthesize(&[], &media, &TimelineSettings::default(), "talk");

        let project_dir = ProjectWriter::new(dir.path().join("projects"))
            .write(&project, &media)
            .unwrap();

        let json = fs::read_to_string(project_dir.join(DRAFT_FILE_NAME)).unwrap();
        let document: DraftDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document.duration, 0);
        assert!(document.tracks.iter().all(|t| t.segments.is_empty()));
    }
}
