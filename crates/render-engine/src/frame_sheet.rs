//! Frame sheet: the resolved state of every output frame.
//!
//! Frames are resolved in contiguous chunks on blocking worker threads.
//! Workers share the plan through an `Arc` and never mutate it; chunks
//! are joined back in order, so the sheet is identical for any worker
//! count.

use std::io::Write;
use std::ops::Range;
use std::sync::Arc;

use filmroom_common::error::{FilmroomError, FilmroomResult};
use filmroom_project_model::clip::ClipKey;
use filmroom_timeline::TimelineState;
use serde::Serialize;

use crate::composition::CompositionPlan;
use crate::overlay::OverlayBox;

/// Per-frame values the renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameParams {
    pub global_frame: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_index: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_key: Option<ClipKey>,

    pub frames_since_start: u64,
    pub frames_remaining: u64,

    /// Fraction of the active segment played, in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,

    /// Remaining time of the active segment as `m:ss`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<String>,

    /// Source frame of the active clip shown at this frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_frame: Option<u64>,

    pub in_lead_in: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<OverlayBox>,
}

impl FrameParams {
    /// Parameters for a frame with no active segment.
    pub fn blank(state: TimelineState) -> Self {
        Self {
            global_frame: state.global_frame,
            active_index: None,
            active_key: None,
            frames_since_start: 0,
            frames_remaining: 0,
            progress: None,
            countdown: None,
            source_frame: None,
            in_lead_in: state.in_lead_in,
            boxes: vec![],
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_index.is_some()
    }
}

/// Progress callback for frame sheet building.
pub type SheetProgressCallback = Box<dyn Fn(SheetProgress) + Send>;

/// Frame sheet progress report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Frames resolved so far.
    pub frames_resolved: u64,

    /// Total frames to resolve.
    pub total_frames: u64,
}

/// Split `[0, total)` into at most `workers` contiguous ranges.
fn chunk_ranges(total: u64, workers: usize) -> Vec<Range<u64>> {
    if total == 0 {
        return vec![];
    }
    let workers = (workers.max(1) as u64).min(total);
    let chunk = total.div_ceil(workers);
    (0..workers)
        .map(|i| (i * chunk)..((i + 1) * chunk).min(total))
        .filter(|range| !range.is_empty())
        .collect()
}

/// Resolve every frame of `plan` using up to `workers` blocking tasks.
pub async fn build_frame_sheet(
    plan: Arc<CompositionPlan>,
    workers: usize,
    progress: Option<SheetProgressCallback>,
) -> FilmroomResult<Vec<FrameParams>> {
    let total_frames = plan.duration_in_frames();
    let ranges = chunk_ranges(total_frames, workers);
    tracing::debug!(
        total_frames,
        chunks = ranges.len(),
        "Building frame sheet"
    );

    let handles: Vec<_> = ranges
        .into_iter()
        .map(|range| {
            let plan = Arc::clone(&plan);
            tokio::task::spawn_blocking(move || {
                range
                    .map(|frame| plan.frame_params(frame))
                    .collect::<FilmroomResult<Vec<_>>>()
            })
        })
        .collect();

    let mut frames = Vec::new();
    for handle in handles {
        let chunk = handle
            .await
            .map_err(|e| FilmroomError::render(format!("Frame worker failed: {e}")))??;
        frames.extend(chunk);

        if let Some(cb) = &progress {
            let frames_resolved = frames.len() as u64;
            cb(SheetProgress {
                progress: frames_resolved as f64 / total_frames.max(1) as f64,
                frames_resolved,
                total_frames,
            });
        }
    }

    tracing::info!(frames = frames.len(), "Frame sheet complete");
    Ok(frames)
}

/// Write frames as JSON lines, one object per frame.
pub fn write_json_lines<W: Write>(frames: &[FrameParams], mut out: W) -> FilmroomResult<()> {
    for frame in frames {
        serde_json::to_writer(&mut out, frame)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
