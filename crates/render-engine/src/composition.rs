//! Composition planning.
//!
//! Turns validated render props into everything the external renderer
//! needs for one job: the composition metadata, one placement per clip and
//! the preview grid. The plan keeps its laid-out timeline so any output
//! frame can be resolved against it afterwards.

use std::collections::BTreeMap;

use filmroom_common::clock::FrameRate;
use filmroom_common::config::{MediaMode, RenderDefaults};
use filmroom_common::error::{FilmroomError, FilmroomResult};
use filmroom_project_model::clip::{ClipDescriptor, VideoId};
use filmroom_project_model::props::{RejectedClip, RenderProps, TemplateKind};
use filmroom_project_model::video::{FrameSize, VideoLookup, VideoRecord};
use filmroom_timeline::{preview_grid, PreviewTile, Template, Timeline, TimelineState};
use serde::Serialize;

use crate::frame_sheet::FrameParams;
use crate::media::MediaResolver;
use crate::overlay::{TrackingOverlay, OVERLAY_CONTAINER};
use crate::placement::{to_placement, Placement};

/// Output parameters of the composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionMetadata {
    pub duration_in_frames: u64,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

/// Compute composition metadata for a laid-out timeline.
///
/// Dimensions come from `first_video`'s recorded metadata, each side
/// falling back to the configured fallback size.
pub fn calculate_metadata(
    timeline: &Timeline,
    first_video: Option<&VideoRecord>,
    defaults: &RenderDefaults,
) -> CompositionMetadata {
    let fallback = FrameSize::new(defaults.fallback_width, defaults.fallback_height);
    let size = first_video
        .map(|video| video.dimensions_or(fallback))
        .unwrap_or(fallback);

    CompositionMetadata {
        duration_in_frames: timeline.total_duration(),
        width: size.width,
        height: size.height,
        fps: FrameRate::new(defaults.fps).fps(),
    }
}

/// A clip left out of the composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedClip {
    pub key: String,
    pub video_id: VideoId,
    pub reason: String,
}

/// Overrides applied on top of the props file and configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionOptions {
    pub template: Option<TemplateKind>,
    pub media_mode: Option<MediaMode>,
}

/// Everything the renderer needs for one job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionPlan {
    pub template: Template,
    pub media_mode: MediaMode,
    pub metadata: CompositionMetadata,
    pub placements: Vec<Placement>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preview_tiles: Vec<PreviewTile>,

    /// Clips whose video could not be placed.
    pub skipped: Vec<SkippedClip>,

    /// Clips that failed validation when the props were loaded.
    pub rejected: Vec<RejectedClip>,

    #[serde(skip)]
    timeline: Timeline,

    #[serde(skip)]
    overlays: BTreeMap<VideoId, TrackingOverlay>,
}

/// Build the composition plan for `props`.
///
/// Clips whose video is unknown or has no media file are skipped, logged
/// and reported, and the remaining clips are laid out with recomputed
/// offsets. A plan with no frames is [`FilmroomError::DegenerateTimeline`].
pub fn prepare_composition(
    props: &RenderProps,
    defaults: &RenderDefaults,
    options: CompositionOptions,
) -> FilmroomResult<CompositionPlan> {
    let media_mode = options
        .media_mode
        .or_else(|| props.use_static_file.map(MediaMode::from_static_flag))
        .unwrap_or(defaults.media_mode);
    let resolver = MediaResolver::from_defaults(defaults).with_mode(media_mode);
    let template = Template::from_kind(
        options.template.or(props.template).unwrap_or_default(),
        defaults,
    );

    let mut kept: Vec<ClipDescriptor> = Vec::with_capacity(props.clips.len());
    let mut skipped = vec![];
    for clip in props.clips.iter() {
        let reason = match props.videos.find_video(clip.video_id) {
            None => Some(FilmroomError::missing_video(clip.video_id, clip.key.as_str()).to_string()),
            Some(video) if resolver.resolve(video).is_none() => {
                Some(format!("video {} has no media file", clip.video_id))
            }
            Some(_) => None,
        };
        match reason {
            Some(reason) => {
                tracing::warn!(
                    key = %clip.key,
                    video_id = clip.video_id,
                    reason = %reason,
                    "Skipping clip"
                );
                skipped.push(SkippedClip {
                    key: clip.key.to_string(),
                    video_id: clip.video_id,
                    reason,
                });
            }
            None => kept.push(clip.clone()),
        }
    }

    let timeline = template.lay_out(&kept)?;
    if timeline.total_duration() == 0 {
        tracing::info!(
            skipped = skipped.len(),
            rejected = props.rejected.len(),
            "Nothing to render"
        );
        return Err(FilmroomError::DegenerateTimeline);
    }

    // Every kept clip has a known video, and the timeline is not empty here.
    let first_video = kept
        .first()
        .and_then(|clip| props.videos.find_video(clip.video_id));
    let metadata = calculate_metadata(&timeline, first_video, defaults);

    let mut placements = Vec::with_capacity(timeline.len());
    let mut overlays = BTreeMap::new();
    for entry in timeline.entries() {
        let video = props
            .videos
            .find_video(entry.clip.video_id)
            .ok_or_else(|| FilmroomError::missing_video(entry.clip.video_id, entry.clip.key.as_str()))?;
        placements.push(to_placement(entry, video, &resolver)?);
        if !overlays.contains_key(&video.id) {
            if let Some(overlay) = TrackingOverlay::from_video(video) {
                overlays.insert(video.id, overlay);
            }
        }
    }

    let preview_tiles = match template {
        Template::PreviewThenBackToBack { .. } => {
            preview_grid(placements.len(), props.selected_video_count())
        }
        _ => vec![],
    };

    tracing::info!(
        template = ?template.kind(),
        clips = placements.len(),
        skipped = skipped.len(),
        rejected = props.rejected.len(),
        duration_frames = metadata.duration_in_frames,
        width = metadata.width,
        height = metadata.height,
        "Prepared composition"
    );

    Ok(CompositionPlan {
        template,
        media_mode,
        metadata,
        placements,
        preview_tiles,
        skipped,
        rejected: props.rejected.clone(),
        timeline,
        overlays,
    })
}

impl CompositionPlan {
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::new(self.metadata.fps)
    }

    pub fn duration_in_frames(&self) -> u64 {
        self.metadata.duration_in_frames
    }

    /// Timeline state at `global_frame`.
    pub fn resolve(&self, global_frame: u64) -> TimelineState {
        self.timeline.resolve(global_frame)
    }

    /// Tracking overlay of `video_id`, if its metadata carries boxes.
    pub fn overlay(&self, video_id: VideoId) -> Option<&TrackingOverlay> {
        self.overlays.get(&video_id)
    }

    /// Everything the renderer draws at `global_frame`.
    pub fn frame_params(&self, global_frame: u64) -> FilmroomResult<FrameParams> {
        let state = self.resolve(global_frame);
        let Some(active) = state.active else {
            return Ok(FrameParams::blank(state));
        };

        let entry = &self.timeline.entries()[active.index];
        let source_frame = entry.source_frame_at(global_frame);
        let boxes = match (source_frame, self.overlay(entry.clip.video_id)) {
            (Some(frame), Some(overlay)) => overlay.boxes_at(frame, OVERLAY_CONTAINER),
            _ => vec![],
        };

        Ok(FrameParams {
            global_frame,
            active_index: Some(active.index),
            active_key: Some(entry.clip.key.clone()),
            frames_since_start: active.frames_since_start,
            frames_remaining: active.frames_remaining,
            progress: Some(active.progress()?),
            countdown: Some(active.countdown(self.frame_rate()).to_string()),
            source_frame,
            in_lead_in: false,
            boxes,
        })
    }
}
