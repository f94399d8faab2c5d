//! Player-tracking overlays.
//!
//! Tracking boxes are recorded against the source video's 29.97 fps frame
//! numbering, while compositions run at 30 fps. Lookups convert the
//! composed source frame first, then take every player from the first
//! sample that has any player on that frame.

use std::collections::BTreeMap;

use filmroom_project_model::video::{BoxSample, FrameSize, VideoRecord};
use serde::Serialize;

/// Size of the overlay layer the boxes are drawn in.
pub const OVERLAY_CONTAINER: FrameSize = FrameSize {
    width: 1280,
    height: 720,
};

/// Source size assumed when metadata does not record one.
pub const TRACKING_SOURCE_FALLBACK: FrameSize = FrameSize {
    width: 1920,
    height: 1080,
};

const TRACKING_FPS: f64 = 29.97;
const COMPOSITION_FPS: f64 = 30.0;

/// Convert a 30 fps frame index to the 29.97 fps numbering boxes use.
pub fn to_tracking_frame(frame: u64) -> i64 {
    (frame as f64 * (TRACKING_FPS / COMPOSITION_FPS)).round() as i64
}

/// A player's box in overlay pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayBox {
    pub player: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale a `[x, y, w, h]` box from `source` pixels to `container` pixels.
pub fn scale_box(player: &str, bbox: [f64; 4], source: FrameSize, container: FrameSize) -> OverlayBox {
    let scale_x = container.width as f64 / source.width.max(1) as f64;
    let scale_y = container.height as f64 / source.height.max(1) as f64;
    OverlayBox {
        player: player.to_string(),
        x: bbox[0] * scale_x,
        y: bbox[1] * scale_y,
        width: bbox[2] * scale_x,
        height: bbox[3] * scale_y,
    }
}

/// Tracking boxes of one video, indexed by tracking frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingOverlay {
    samples: Vec<BoxSample>,
    /// Tracking frame → index of the first sample with a player on it.
    first_sample: BTreeMap<i64, usize>,
    source_size: FrameSize,
}

impl TrackingOverlay {
    pub fn new(samples: Vec<BoxSample>, source_size: FrameSize) -> Self {
        let mut first_sample = BTreeMap::new();
        for (index, sample) in samples.iter().enumerate() {
            for player_box in sample.values() {
                first_sample.entry(player_box.frame).or_insert(index);
            }
        }
        Self {
            samples,
            first_sample,
            source_size,
        }
    }

    /// Overlay for `video`, or `None` when its metadata has no boxes.
    pub fn from_video(video: &VideoRecord) -> Option<Self> {
        let metadata = video.parsed_metadata()?;
        if metadata.boxes.is_empty() {
            return None;
        }
        let source_size = metadata.size_or(TRACKING_SOURCE_FALLBACK);
        Some(Self::new(metadata.boxes, source_size))
    }

    pub fn source_size(&self) -> FrameSize {
        self.source_size
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Unscaled boxes shown at composed source frame `source_frame`.
    pub fn boxes_for_frame(&self, source_frame: u64) -> Vec<(&str, [f64; 4])> {
        let frame = to_tracking_frame(source_frame);
        self.first_sample
            .get(&frame)
            .map(|&index| {
                self.samples[index]
                    .iter()
                    .map(|(player, b)| (player.as_str(), b.bbox))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Boxes at `source_frame`, scaled into `container`.
    pub fn boxes_at(&self, source_frame: u64, container: FrameSize) -> Vec<OverlayBox> {
        self.boxes_for_frame(source_frame)
            .into_iter()
            .map(|(player, bbox)| scale_box(player, bbox, self.source_size, container))
            .collect()
    }
}
