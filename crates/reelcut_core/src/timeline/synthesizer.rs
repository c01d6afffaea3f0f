//! Timeline synthesis: lays validated reels onto output tracks and builds
//! the project identifier graph.

use crate::config::TimelineSettings;
use crate::models::{
    new_id, Material, MediaInfo, Project, Reel, Segment, TimeSpan, Track, TrackType,
};

/// Lay out reels on the output timeline and build the project graph.
///
/// Cues play back-to-back within a reel; consecutive reels are separated by
/// the configured gap, with no gap before the first reel or after the last.
/// Video segments are mirrored onto the audio track with identical geometry
/// (and distinct ids) when the media carries an audio stream.
///
/// Every call produces a fresh project: new project, material, track, and
/// segment ids are generated each run.
pub fn synthesize(
    reels: &[Reel],
    media: &MediaInfo,
    settings: &TimelineSettings,
    project_name: &str,
) -> Project {
    let material = Material::from_media(media);
    let mut video = Track::new(TrackType::Video);
    let mut audio = Track::new(TrackType::Audio);

    let mut cursor_us: u64 = 0;
    for (reel_idx, reel) in reels.iter().enumerate() {
        if reel_idx > 0 {
            cursor_us += settings.gap_us();
        }

        for cue in &reel.cues {
            let len = cue.span.len_us();
            // Spans are validated upstream; len is always > 0 here
            let target = TimeSpan {
                start_us: cursor_us,
                end_us: cursor_us + len,
            };

            video
                .segments
                .push(Segment::new(&material.id, cue.span, target));
            if media.has_audio {
                audio
                    .segments
                    .push(Segment::new(&material.id, cue.span, target));
            }

            cursor_us += len;
        }
    }

    Project {
        id: new_id(),
        name: project_name.to_string(),
        materials: vec![material],
        tracks: vec![video, audio],
        total_duration_us: cursor_us,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cue;
    use std::collections::HashSet;

    fn media(duration_secs: u64) -> MediaInfo {
        MediaInfo::new("/videos/source.mp4", duration_secs * 1_000_000)
    }

    fn settings(gap_secs: u32) -> TimelineSettings {
        TimelineSettings {
            gap_between_reels_seconds: gap_secs,
            ..TimelineSettings::default()
        }
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
    fn two_reel_layout_with_gap() {
        // Reel 1: 5s hook from late in the source, 10s context from early.
        // Reel 2: a single 5s cue. Gap 10s, source 30 minutes.
        let reels = vec![reel(&[(930, 935), (60, 70)]), reel(&[(1200, 1205)])];
        let project = synthesize(&reels, &media(1800), &settings(10), "demo");

        let video = project.track(TrackType::Video).unwrap();
        assert_eq!(video.segments.len(), 3);

        // Reel 1 plays at [0s, 5s) and [5s, 15s)
        assert_eq!(video.segments[0].target.start_us, 0);
        assert_eq!(video.segments[0].target.end_us, 5_000_000);
        assert_eq!(video.segments[1].target.start_us, 5_000_000);
        assert_eq!(video.segments[1].target.end_us, 15_000_000);

        // Reel 2 starts after 15s of content plus the 10s gap
        assert_eq!(video.segments[2].target.start_us, 25_000_000);

        // total = sum of reel durations + (N-1) * gap
        assert_eq!(project.total_duration_us, 30_000_000);
    }

    #[test]
    fn single_reel_has_no_gap() {
        let project = synthesize(&[reel(&[(0, 5), (10, 15)])], &media(60), &settings(10), "x");
        assert_eq!(project.total_duration_us, 10_000_000);
    }

    #[test]
    fn duration_formula_holds_for_many_reels() {
        let reels = vec![reel(&[(0, 5)]), reel(&[(10, 17)]), reel(&[(20, 23)])];
        let gap = 30;
        let project = synthesize(&reels, &media(60), &settings(gap), "x");

        let content: u64 = reels.iter().map(|r| r.duration_us()).sum();
        let expected = content + (reels.len() as u64 - 1) * u64::from(gap) * 1_000_000;
        assert_eq!(project.total_duration_us, expected);
    }

    #[test]
    fn segments_are_strictly_ordered_and_non_overlapping() {
        let reels = vec![reel(&[(930, 935), (60, 70), (100, 101)]), reel(&[(0, 8)])];
        let project = synthesize(&reels, &media(1800), &settings(10), "x");

        for track in &project.tracks {
            assert!(track.is_well_formed(), "{} track overlaps", track.kind);
            let starts: Vec<u64> = track.segments.iter().map(|s| s.target.start_us).collect();
            let mut sorted = starts.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(starts, sorted);
        }
    }

    #[test]
    fn audio_mirrors_video_geometry_with_distinct_ids() {
        let project = synthesize(&[reel(&[(0, 5), (60, 70)])], &media(120), &settings(10), "x");

        let video = project.track(TrackType::Video).unwrap();
        let audio = project.track(TrackType::Audio).unwrap();
        assert_eq!(video.segments.len(), audio.segments.len());

        for (v, a) in video.segments.iter().zip(&audio.segments) {
            assert_eq!(v.source, a.source);
            assert_eq!(v.target, a.target);
            assert_eq!(v.material_id, a.material_id);
            assert_ne!(v.id, a.id);
        }
    }

    #[test]
    fn silent_media_gets_empty_audio_track() {
        let media = media(120).with_audio(false);
        let project = synthesize(&[reel(&[(0, 5)])], &media, &settings(10), "x");

        assert_eq!(project.track(TrackType::Video).unwrap().segments.len(), 1);
        assert!(project.track(TrackType::Audio).unwrap().segments.is_empty());
    }

    #[test]
    fn source_ranges_are_independent_of_target_order() {
        // Hook comes from later in the source than the context after it
        let project = synthesize(&[reel(&[(930, 935), (60, 70)])], &media(1800), &settings(10), "x");
        let video = project.track(TrackType::Video).unwrap();

        assert!(video.segments[0].source.start_us > video.segments[1].source.start_us);
        assert!(video.segments[0].target.start_us < video.segments[1].target.start_us);
    }

    #[test]
    fn all_identifiers_are_unique() {
        let project = synthesize(
            &[reel(&[(0, 5), (10, 15)]), reel(&[(20, 25)])],
            &media(60),
            &settings(10),
            "x",
        );

        let mut ids: HashSet<&str> = HashSet::new();
        ids.insert(&project.id);
        for m in &project.materials {
            assert!(ids.insert(&m.id));
        }
        for t in &project.tracks {
            assert!(ids.insert(&t.id));
            for s in &t.segments {
                assert!(ids.insert(&s.id));
            }
        }
    }

    #[test]
    fn rerunning_synthesis_generates_fresh_ids() {
        let reels = [reel(&[(0, 5)])];
        let a = synthesize(&reels, &media(60), &settings(10), "x");
        let b = synthesize(&reels, &media(60), &settings(10), "x");

        assert_ne!(a.id, b.id);
        assert_ne!(a.materials[0].id, b.materials[0].id);
        assert_ne!(a.tracks[0].segments[0].id, b.tracks[0].segments[0].id);
    }

    #[test]
    fn empty_reel_list_yields_valid_empty_project() {
        let project = synthesize(&[], &media(60), &settings(10), "empty");

        assert_eq!(project.total_duration_us, 0);
        assert_eq!(project.segment_count(), 0);
        assert_eq!(project.tracks.len(), 2);
        assert_eq!(project.materials.len(), 1);
    }

    #[test]
    fn segments_reference_the_single_material() {
        let project = synthesize(&[reel(&[(0, 5)])], &media(60), &settings(10), "x");
        let material_id = &project.materials[0].id;
        for track in &project.tracks {
            for segment in &track.segments {
                assert_eq!(&segment.material_id, material_id);
            }
        }
    }
}
