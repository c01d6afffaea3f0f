//! Inspect command - audits an existing draft file.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use reelcut_core::draft::{audit_draft, DraftDocument, DRAFT_FILE_NAME};

use crate::InspectArgs;

/// Run the inspect command.
pub fn run(args: InspectArgs) -> Result<()> {
    let draft_path = resolve_draft_path(args.draft);

    let json = fs::read_to_string(&draft_path)
        .with_context(|| format!("reading draft {}", draft_path.display()))?;
    let document: DraftDocument =
        serde_json::from_str(&json).context("parsing draft document")?;

    println!(
        "'{}' (schema {}), {:.1}s timeline",
        document.name,
        document.version,
        document.duration as f64 / 1_000_000.0
    );

    for track in &document.tracks {
        println!("  {} track: {} segments", track.kind, track.segments.len());
        for segment in &track.segments {
            println!(
                "    [{:>10.3}s +{:>7.3}s] from source {:.3}s",
                segment.target_timerange.start as f64 / 1_000_000.0,
                segment.target_timerange.duration as f64 / 1_000_000.0,
                segment.source_timerange.start as f64 / 1_000_000.0,
            );
        }
    }

    let report = audit_draft(&document);

    if !report.video_gaps_us.is_empty() {
        let gaps: Vec<String> = report
            .video_gaps_us
            .iter()
            .map(|g| format!("{:.1}s", *g as f64 / 1_000_000.0))
            .collect();
        println!("  gaps between segments: {}", gaps.join(", "));
    }

    if report.findings.is_empty() {
        println!("No problems found.");
        Ok(())
    } else {
        for finding in &report.findings {
            eprintln!("Problem: {finding}");
        }
        bail!("{} problem(s) found in draft", report.findings.len());
    }
}

/// Accept either a draft file or a project directory containing one.
fn resolve_draft_path(path: PathBuf) -> PathBuf {
    if path.is_dir() {
        path.join(DRAFT_FILE_NAME)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolves_project_directory_to_draft_file() {
        let dir = tempdir().unwrap();
        let resolved = resolve_draft_path(dir.path().to_path_buf());
        assert_eq!(resolved, dir.path().join(DRAFT_FILE_NAME));

        let file = dir.path().join("other.json");
        fs::write(&file, "{}").unwrap();
        assert_eq!(resolve_draft_path(file.clone()), file);
    }
}
