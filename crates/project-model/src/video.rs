//! Source video records.
//!
//! Videos are owned by the external tag/video store; the composition engine
//! only reads them. Their `metadata` column is stored either as a JSON
//! object or as a JSON-encoded string, so parsing is lenient: anything that
//! cannot be read falls back to defaults instead of failing the render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clip::VideoId;

/// Output or source frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// Used when a video has no usable recorded dimensions.
    pub const FALLBACK: FrameSize = FrameSize {
        width: 1080,
        height: 1080,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A source video as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: VideoId,

    #[serde(default)]
    pub name: String,

    /// Server-side path of the media file.
    #[serde(default)]
    pub filepath: Option<String>,

    /// Raw metadata: an object, or a string holding JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// One player's bounding box in a tracking sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBox {
    /// Source frame (29.97 fps numbering) the box was detected on.
    pub frame: i64,
    /// `[x, y, width, height]` in source pixels.
    pub bbox: [f64; 4],
}

/// Player name → box, for one tracking sample.
pub type BoxSample = BTreeMap<String, PlayerBox>;

/// The parts of a video's metadata the composition engine reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub boxes: Vec<BoxSample>,
}

impl VideoMetadata {
    /// Extract known fields from a metadata object.
    ///
    /// Zero or non-integer dimensions count as absent. A malformed `boxes`
    /// array yields no boxes; null samples are dropped.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let dimension = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_u64)
                .filter(|v| *v > 0)
                .and_then(|v| u32::try_from(v).ok())
        };

        let boxes = value
            .get("boxes")
            .cloned()
            .and_then(|raw| serde_json::from_value::<Vec<Option<BoxSample>>>(raw).ok())
            .map(|samples| samples.into_iter().flatten().collect())
            .unwrap_or_default();

        Self {
            width: dimension("width"),
            height: dimension("height"),
            boxes,
        }
    }

    /// Recorded dimensions, each side falling back independently.
    pub fn size_or(&self, fallback: FrameSize) -> FrameSize {
        FrameSize {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
        }
    }
}

impl VideoRecord {
    /// Parsed metadata, or `None` when absent or not valid JSON.
    pub fn parsed_metadata(&self) -> Option<VideoMetadata> {
        match self.metadata.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(encoded) => serde_json::from_str::<serde_json::Value>(encoded)
                .ok()
                .filter(serde_json::Value::is_object)
                .map(|value| VideoMetadata::from_value(&value)),
            value if value.is_object() => Some(VideoMetadata::from_value(value)),
            _ => None,
        }
    }

    /// Recorded frame size, or `fallback` when metadata is absent or malformed.
    pub fn dimensions_or(&self, fallback: FrameSize) -> FrameSize {
        self.parsed_metadata()
            .map(|meta| meta.size_or(fallback))
            .unwrap_or(fallback)
    }

    /// Recorded frame size with the standard 1080×1080 fallback.
    pub fn dimensions(&self) -> FrameSize {
        self.dimensions_or(FrameSize::FALLBACK)
    }

    /// Media file name: the last `/` segment of the file path.
    pub fn file_name(&self) -> Option<&str> {
        let path = self.filepath.as_deref()?;
        let name = path.rsplit('/').next().unwrap_or(path);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Read access to the external video collection.
pub trait VideoLookup {
    fn find_video(&self, id: VideoId) -> Option<&VideoRecord>;
}

impl VideoLookup for [VideoRecord] {
    fn find_video(&self, id: VideoId) -> Option<&VideoRecord> {
        self.iter().find(|v| v.id == id)
    }
}

impl VideoLookup for Vec<VideoRecord> {
    fn find_video(&self, id: VideoId) -> Option<&VideoRecord> {
        self.as_slice().find_video(id)
    }
}

impl VideoLookup for BTreeMap<VideoId, VideoRecord> {
    fn find_video(&self, id: VideoId) -> Option<&VideoRecord> {
        self.get(&id)
    }
}
