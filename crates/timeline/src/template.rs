//! Composition templates.
//!
//! A template decides how much of each clip plays and where the sequence
//! starts on the global axis. All of them share the prefix-sum layout; they
//! differ in each clip's window and in an optional preview lead-in.

use filmroom_common::config::RenderDefaults;
use filmroom_common::error::{FilmroomError, FilmroomResult};
use filmroom_project_model::clip::{ClipDescriptor, SourceFrame};
use filmroom_project_model::props::TemplateKind;
use serde::Serialize;

use crate::aggregator::{lay_out, Timeline};

/// A template with its frame parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Template {
    /// Every clip plays in full, back to back from frame 0.
    #[default]
    BackToBack,

    /// Each clip plays `frames_per_clip` frames from its start frame.
    FirstSeconds { frames_per_clip: u64 },

    /// All clips play together in a grid for `preview_frames`, then back to back.
    PreviewThenBackToBack { preview_frames: u64 },
}

impl Template {
    /// Instantiate a template kind with the configured frame counts.
    pub fn from_kind(kind: TemplateKind, defaults: &RenderDefaults) -> Self {
        match kind {
            TemplateKind::BackToBack => Self::BackToBack,
            TemplateKind::FirstSeconds => Self::FirstSeconds {
                frames_per_clip: defaults.first_seconds_frames,
            },
            TemplateKind::PreviewThenBackToBack => Self::PreviewThenBackToBack {
                preview_frames: defaults.preview_frames,
            },
        }
    }

    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::BackToBack => TemplateKind::BackToBack,
            Self::FirstSeconds { .. } => TemplateKind::FirstSeconds,
            Self::PreviewThenBackToBack { .. } => TemplateKind::PreviewThenBackToBack,
        }
    }

    /// Frames of preview before the first clip.
    pub fn lead_in(&self) -> u64 {
        match self {
            Self::PreviewThenBackToBack { preview_frames } => *preview_frames,
            _ => 0,
        }
    }

    /// Lay `clips` out on the global timeline.
    ///
    /// An empty clip sequence yields an empty timeline for every template.
    pub fn lay_out(&self, clips: &[ClipDescriptor]) -> FilmroomResult<Timeline> {
        let entries = match *self {
            Self::BackToBack => lay_out(clips, 0, full_window)?,
            Self::PreviewThenBackToBack { preview_frames } => {
                lay_out(clips, preview_frames, full_window)?
            }
            Self::FirstSeconds { frames_per_clip } => {
                let frames = SourceFrame::try_from(frames_per_clip)
                    .ok()
                    .filter(|f| *f > 0)
                    .ok_or_else(|| {
                        FilmroomError::config(format!(
                            "frames per clip must be between 1 and {}, got {frames_per_clip}",
                            SourceFrame::MAX
                        ))
                    })?;
                lay_out(clips, 0, |clip| {
                    clip.validate()?;
                    let end = clip.start_frame.saturating_add(frames);
                    Ok((clip.start_frame, end, (end - clip.start_frame) as u64))
                })?
            }
        };

        let timeline = Timeline::from_entries(entries);
        tracing::debug!(
            template = ?self.kind(),
            clips = timeline.len(),
            total_frames = timeline.total_duration(),
            "Laid out timeline"
        );
        Ok(timeline)
    }
}

fn full_window(clip: &ClipDescriptor) -> FilmroomResult<(SourceFrame, SourceFrame, u64)> {
    clip.validate()?;
    Ok((clip.start_frame, clip.end_frame, clip.duration()))
}

/// Placement of one clip in the preview grid, in percent of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTile {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}

/// Grid positions for the preview lead-in.
///
/// Uses one column per selected video, at most two; rows are half the
/// frame tall.
pub fn preview_grid(clip_count: usize, selected_video_count: usize) -> Vec<PreviewTile> {
    let columns = selected_video_count.clamp(1, 2);
    let width_pct = 100.0 / columns as f64;
    (0..clip_count)
        .map(|index| {
            let row = index / columns;
            let column = index % columns;
            PreviewTile {
                index,
                row,
                column,
                left_pct: column as f64 * width_pct,
                top_pct: row as f64 * 50.0,
                width_pct,
                height_pct: 50.0,
            }
        })
        .collect()
}
