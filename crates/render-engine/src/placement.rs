//! Segment placement: what the external renderer needs to play one clip.

use filmroom_common::error::{FilmroomError, FilmroomResult};
use filmroom_project_model::clip::{ClipKey, SourceFrame, VideoId};
use filmroom_project_model::video::VideoRecord;
use filmroom_timeline::TimelineEntry;
use serde::Serialize;

use crate::media::{MediaRef, MediaResolver};

/// One clip scheduled on the output timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub clip_key: ClipKey,
    pub video_id: VideoId,

    /// First output frame of the segment.
    pub global_start_frame: u64,

    /// Output frames the segment occupies.
    pub duration_frames: u64,

    /// Source range the renderer plays, end exclusive.
    pub source_frame_start: SourceFrame,
    pub source_frame_end: SourceFrame,

    pub media_ref: MediaRef,

    /// On-screen label, e.g. `"Game 1 - goal (0-150)"`.
    pub caption: String,
}

impl Placement {
    pub fn global_end_frame(&self) -> u64 {
        self.global_start_frame + self.duration_frames
    }
}

/// Map a timeline entry and its source video to a placement.
///
/// Fails when the video has no media file to reference.
pub fn to_placement(
    entry: &TimelineEntry,
    video: &VideoRecord,
    resolver: &MediaResolver,
) -> FilmroomResult<Placement> {
    let media_ref = resolver.resolve(video).ok_or_else(|| {
        FilmroomError::render(format!(
            "video {} ({}) has no media file",
            video.id, video.name
        ))
    })?;

    Ok(Placement {
        clip_key: entry.clip.key.clone(),
        video_id: entry.clip.video_id,
        global_start_frame: entry.global_offset,
        duration_frames: entry.local_duration,
        source_frame_start: entry.source_start,
        source_frame_end: entry.source_end,
        media_ref,
        caption: entry.clip.caption(&video.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmroom_common::config::MediaMode;
    use filmroom_project_model::ClipDescriptor;
    use filmroom_timeline::Timeline;

    fn video() -> VideoRecord {
        VideoRecord {
            id: 4,
            name: "Final".to_string(),
            filepath: Some("/uploads/final.mp4".to_string()),
            metadata: None,
        }
    }

    #[test]
    fn test_placement_mirrors_entry() {
        let clips = vec![
            ClipDescriptor::new(4, "goal", None, 0, 150).unwrap(),
            ClipDescriptor::new(4, "assist", None, 200, 260).unwrap(),
        ];
        let timeline = Timeline::build(&clips).unwrap();
        let resolver = MediaResolver::default().with_mode(MediaMode::StaticFile);

        let placement = to_placement(&timeline.entries()[1], &video(), &resolver).unwrap();
        assert_eq!(placement.global_start_frame, 150);
        assert_eq!(placement.duration_frames, 60);
        assert_eq!(placement.global_end_frame(), 210);
        assert_eq!(placement.source_frame_start, 200);
        assert_eq!(placement.source_frame_end, 260);
        assert_eq!(placement.media_ref.as_str(), "final.mp4");
        assert_eq!(placement.caption, "Final - assist (200-260)");
        assert_eq!(placement.clip_key.as_str(), "4-assist--200-260");
    }

    #[test]
    fn test_video_without_file_is_render_error() {
        let clips = vec![ClipDescriptor::new(4, "goal", None, 0, 150).unwrap()];
        let timeline = Timeline::build(&clips).unwrap();
        let mut bare = video();
        bare.filepath = None;

        let err = to_placement(&timeline.entries()[0], &bare, &MediaResolver::default()).unwrap_err();
        assert!(matches!(err, FilmroomError::Render { .. }));
    }
}
