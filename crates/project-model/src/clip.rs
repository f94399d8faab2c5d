//! Clip descriptors.
//!
//! A clip is a frame range of one source video, promoted from a tag. Clips
//! arrive from the selection UI with frame values that may be numbers or
//! numeric strings; [`RawClip`] captures that wire shape and
//! [`ClipDescriptor`] is the validated, typed value the timeline consumes.

use std::fmt;

use filmroom_common::error::{FilmroomError, FilmroomResult};
use serde::{Deserialize, Serialize};

/// Identifier of a source video record.
pub type VideoId = i64;

/// Frame index within a source video.
pub type SourceFrame = u32;

/// Largest frame index accepted from the wire (signed 32-bit safe).
pub const MAX_SOURCE_FRAME: i64 = i32::MAX as i64;

/// Stable clip identifier.
///
/// Composed as `{videoId}-{tagName}-{frame}-{startFrame}-{endFrame}`; the
/// tag frame segment is empty when the tag carried no frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipKey(String);

impl ClipKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build the key from the clip's identifying fields.
    pub fn compose(
        video_id: VideoId,
        tag_name: &str,
        tag_frame: Option<SourceFrame>,
        start_frame: SourceFrame,
        end_frame: SourceFrame,
    ) -> Self {
        let frame = tag_frame.map(|f| f.to_string()).unwrap_or_default();
        Self(format!(
            "{video_id}-{tag_name}-{frame}-{start_frame}-{end_frame}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A frame value as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FrameValue {
    /// Parse into a source frame index.
    ///
    /// Accepts non-negative integers, integral floats and trimmed decimal
    /// strings. Everything else is rejected rather than coerced.
    pub fn parse(&self) -> Result<SourceFrame, String> {
        let value = match self {
            Self::Integer(n) => *n,
            Self::Float(f) => {
                if !f.is_finite() || f.fract() != 0.0 {
                    return Err(format!("frame {f} is not a whole number"));
                }
                if *f < i64::MIN as f64 || *f > i64::MAX as f64 {
                    return Err(format!("frame {f} is out of range"));
                }
                *f as i64
            }
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err("frame is an empty string".to_string());
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| format!("frame {s:?} is not an integer"))?
            }
        };

        if value < 0 {
            return Err(format!("frame {value} is negative"));
        }
        if value > MAX_SOURCE_FRAME {
            return Err(format!("frame {value} exceeds {MAX_SOURCE_FRAME}"));
        }
        Ok(value as SourceFrame)
    }
}

impl From<SourceFrame> for FrameValue {
    fn from(frame: SourceFrame) -> Self {
        Self::Integer(frame as i64)
    }
}

/// A clip exactly as the selection UI serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    pub video_id: VideoId,

    #[serde(default)]
    pub tag_name: String,

    /// Frame of the originating tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameValue>,

    #[serde(default)]
    pub start_frame: Option<FrameValue>,

    #[serde(default)]
    pub end_frame: Option<FrameValue>,
}

impl RawClip {
    /// Key used in error reports, even when the frames do not parse.
    pub fn display_key(&self) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.video_id, self.tag_name))
    }
}

/// A validated, immutable clip selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawClip")]
pub struct ClipDescriptor {
    pub key: ClipKey,
    pub video_id: VideoId,
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<SourceFrame>,
    pub start_frame: SourceFrame,
    pub end_frame: SourceFrame,
}

impl ClipDescriptor {
    /// Create a clip with a composed key, validating the frame range.
    pub fn new(
        video_id: VideoId,
        tag_name: impl Into<String>,
        frame: Option<SourceFrame>,
        start_frame: SourceFrame,
        end_frame: SourceFrame,
    ) -> FilmroomResult<Self> {
        let tag_name = tag_name.into();
        let clip = Self {
            key: ClipKey::compose(video_id, &tag_name, frame, start_frame, end_frame),
            video_id,
            tag_name,
            frame,
            start_frame,
            end_frame,
        };
        clip.validate()?;
        Ok(clip)
    }

    /// Check the frame-range invariant: `end_frame > start_frame`, both in range.
    pub fn validate(&self) -> FilmroomResult<()> {
        if self.end_frame as i64 > MAX_SOURCE_FRAME {
            return Err(FilmroomError::invalid_clip(
                self.key.as_str(),
                format!("end frame {} exceeds {MAX_SOURCE_FRAME}", self.end_frame),
            ));
        }
        if self.end_frame <= self.start_frame {
            return Err(FilmroomError::invalid_clip(
                self.key.as_str(),
                format!(
                    "end frame {} must be after start frame {}",
                    self.end_frame, self.start_frame
                ),
            ));
        }
        Ok(())
    }

    /// Number of source frames covered, zero for degenerate ranges.
    pub fn duration(&self) -> u64 {
        self.end_frame.saturating_sub(self.start_frame) as u64
    }

    /// Human-readable label used by the renderer's caption.
    pub fn caption(&self, video_name: &str) -> String {
        format!(
            "{video_name} - {} ({}-{})",
            self.tag_name, self.start_frame, self.end_frame
        )
    }
}

impl TryFrom<RawClip> for ClipDescriptor {
    type Error = FilmroomError;

    fn try_from(raw: RawClip) -> Result<Self, Self::Error> {
        let display_key = raw.display_key();
        let parse = |value: Option<&FrameValue>, label: &str| -> FilmroomResult<SourceFrame> {
            let value = value.ok_or_else(|| {
                FilmroomError::invalid_clip(&display_key, format!("missing {label}"))
            })?;
            value
                .parse()
                .map_err(|reason| FilmroomError::invalid_clip(&display_key, format!("{label}: {reason}")))
        };

        let start_frame = parse(raw.start_frame.as_ref(), "start frame")?;
        let end_frame = parse(raw.end_frame.as_ref(), "end frame")?;
        let frame = match raw.frame.as_ref() {
            Some(value) => Some(parse(Some(value), "tag frame")?),
            None => None,
        };

        let key = match raw.key {
            Some(key) if !key.trim().is_empty() => ClipKey::new(key),
            _ => ClipKey::compose(raw.video_id, &raw.tag_name, frame, start_frame, end_frame),
        };

        let clip = Self {
            key,
            video_id: raw.video_id,
            tag_name: raw.tag_name,
            frame,
            start_frame,
            end_frame,
        };
        clip.validate()?;
        Ok(clip)
    }
}

impl From<&ClipDescriptor> for RawClip {
    fn from(clip: &ClipDescriptor) -> Self {
        Self {
            key: Some(clip.key.to_string()),
            video_id: clip.video_id,
            tag_name: clip.tag_name.clone(),
            frame: clip.frame.map(FrameValue::from),
            start_frame: Some(clip.start_frame.into()),
            end_frame: Some(clip.end_frame.into()),
        }
    }
}
