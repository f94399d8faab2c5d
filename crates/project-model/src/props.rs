//! Render props: the JSON document handed to the external renderer.
//!
//! The props file carries the selected videos, the full video records, the
//! ordered clip selection and the media resolution flag. Clips are
//! validated on load; clips that fail validation are reported alongside
//! the parsed props instead of being dropped silently.

use std::path::{Path, PathBuf};

use filmroom_common::error::FilmroomError;
use serde::{Deserialize, Serialize};

use crate::clip::{ClipDescriptor, RawClip, VideoId};
use crate::selection::ClipSelection;
use crate::video::VideoRecord;

/// Which layout the composition uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TemplateKind {
    /// Every clip in full, back to back.
    #[default]
    #[serde(rename = "VideoPlayerTracking", alias = "back_to_back")]
    BackToBack,
    /// A fixed number of frames from the start of every clip.
    #[serde(rename = "VideoFirstFiveSeconds", alias = "first_seconds")]
    FirstSeconds,
    /// A preview grid of all clips, then every clip back to back.
    #[serde(rename = "VideoPreviewThenBackToBack", alias = "preview_then_back_to_back")]
    PreviewThenBackToBack,
}

impl TemplateKind {
    /// Parse a template from its composition id or short name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "VideoPlayerTracking" | "back_to_back" | "back-to-back" => Some(Self::BackToBack),
            "VideoFirstFiveSeconds" | "first_seconds" | "first-seconds" => Some(Self::FirstSeconds),
            "VideoPreviewThenBackToBack" | "preview_then_back_to_back" | "preview" => {
                Some(Self::PreviewThenBackToBack)
            }
            _ => None,
        }
    }
}

/// Props file exactly as written by the selection UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRenderProps {
    #[serde(default)]
    pub selected_videos: Vec<VideoId>,

    #[serde(default)]
    pub videos: Vec<VideoRecord>,

    /// Clips are kept as raw JSON so one malformed clip cannot fail the file.
    #[serde(default)]
    pub selected_tags: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_static_file: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateKind>,
}

/// A clip from the props file that could not be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedClip {
    /// Position in the props file's `selectedTags` array.
    pub index: usize,
    pub key: String,
    pub reason: String,
}

/// Validated render props.
#[derive(Debug, Clone)]
pub struct RenderProps {
    pub selected_videos: Vec<VideoId>,
    pub videos: Vec<VideoRecord>,
    /// Valid clips, in playback order.
    pub clips: ClipSelection,
    /// Clips dropped during validation.
    pub rejected: Vec<RejectedClip>,
    pub use_static_file: Option<bool>,
    pub template: Option<TemplateKind>,
}

impl From<RawRenderProps> for RenderProps {
    fn from(raw: RawRenderProps) -> Self {
        let mut clips = ClipSelection::new();
        let mut rejected = vec![];

        for (index, value) in raw.selected_tags.into_iter().enumerate() {
            let raw_clip = match serde_json::from_value::<RawClip>(value.clone()) {
                Ok(raw_clip) => raw_clip,
                Err(e) => {
                    rejected.push(RejectedClip {
                        index,
                        key: display_key_of(&value),
                        reason: format!("malformed clip: {e}"),
                    });
                    continue;
                }
            };
            let display_key = raw_clip.display_key();
            match ClipDescriptor::try_from(raw_clip) {
                Ok(clip) => {
                    let key = clip.key.to_string();
                    if !clips.push(clip) {
                        rejected.push(RejectedClip {
                            index,
                            key,
                            reason: "duplicate clip key".to_string(),
                        });
                    }
                }
                Err(FilmroomError::InvalidClip { key, reason }) => {
                    rejected.push(RejectedClip { index, key, reason });
                }
                Err(other) => rejected.push(RejectedClip {
                    index,
                    key: display_key,
                    reason: other.to_string(),
                }),
            }
        }

        Self {
            selected_videos: raw.selected_videos,
            videos: raw.videos,
            clips,
            rejected,
            use_static_file: raw.use_static_file,
            template: raw.template,
        }
    }
}

/// Best-effort key for a clip that did not deserialize.
fn display_key_of(value: &serde_json::Value) -> String {
    if let Some(key) = value.get("key").and_then(serde_json::Value::as_str) {
        return key.to_string();
    }
    let video_id = value.get("videoId").map(ToString::to_string).unwrap_or_default();
    let tag_name = value
        .get("tagName")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    format!("{video_id}-{tag_name}")
}

impl RenderProps {
    /// Parse props from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawRenderProps = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Load props from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| ProjectError::IoError {
            path: path.clone(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| ProjectError::ParseError { path, source: e })
    }

    /// Number of distinct videos the selection draws from.
    ///
    /// Uses the explicit `selectedVideos` list when present, otherwise the
    /// videos referenced by the clips.
    pub fn selected_video_count(&self) -> usize {
        if self.selected_videos.is_empty() {
            self.clips.video_ids().len()
        } else {
            let mut ids = self.selected_videos.clone();
            ids.sort_unstable();
            ids.dedup();
            ids.len()
        }
    }
}

/// Errors that can occur when reading props files.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}
