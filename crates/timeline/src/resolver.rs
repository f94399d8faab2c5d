//! Per-frame state resolution.
//!
//! Given an immutable entry table and a global frame, find the active entry
//! by binary search and derive the elapsed/remaining frame counts, progress
//! fraction and countdown for it. Called once per output frame, potentially
//! from many threads at once; it never allocates or mutates.

use filmroom_common::clock::{Countdown, FrameRate};
use filmroom_common::error::{FilmroomError, FilmroomResult};
use serde::Serialize;

use crate::aggregator::TimelineEntry;

/// The entry active at a given frame and how far into it playback is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSegment {
    /// Index into the entry table.
    pub index: usize,
    pub frames_since_start: u64,
    pub frames_remaining: u64,
    pub local_duration: u64,
}

impl ActiveSegment {
    /// Fraction of the segment already played, clamped to `[0, 1]`.
    ///
    /// A zero-length segment has no meaningful progress and is an error.
    pub fn progress(&self) -> FilmroomResult<f64> {
        if self.local_duration == 0 {
            return Err(FilmroomError::zero_length_segment(format!(
                "#{}",
                self.index
            )));
        }
        Ok((self.frames_since_start as f64 / self.local_duration as f64).clamp(0.0, 1.0))
    }

    /// Time left in the segment as `m:ss`.
    pub fn countdown(&self, rate: FrameRate) -> Countdown {
        rate.countdown(self.frames_remaining)
    }
}

/// Derived state of one global frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineState {
    pub global_frame: u64,
    pub total_duration: u64,

    /// `None` when no segment is active at this frame.
    pub active: Option<ActiveSegment>,

    /// The frame lies before the first segment (preview lead-in).
    pub in_lead_in: bool,
}

impl TimelineState {
    fn blank(global_frame: u64, total_duration: u64, in_lead_in: bool) -> Self {
        Self {
            global_frame,
            total_duration,
            active: None,
            in_lead_in,
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|a| a.index)
    }

    /// Frames past the end of the composition render nothing.
    pub fn is_past_end(&self) -> bool {
        self.global_frame >= self.total_duration
    }
}

/// Resolve the state of `global_frame` against `entries`.
///
/// Frames at or beyond `total_duration`, and any frame of an empty table,
/// resolve to "no active segment" rather than an error.
pub fn resolve_frame(
    entries: &[TimelineEntry],
    total_duration: u64,
    global_frame: u64,
) -> TimelineState {
    if entries.is_empty() || global_frame >= total_duration {
        return TimelineState::blank(global_frame, total_duration, false);
    }

    // Entries are sorted by offset by construction.
    let after = entries.partition_point(|e| e.global_offset <= global_frame);
    if after == 0 {
        return TimelineState::blank(global_frame, total_duration, true);
    }

    let index = after - 1;
    let entry = &entries[index];
    if !entry.contains(global_frame) {
        return TimelineState::blank(global_frame, total_duration, false);
    }

    let frames_since_start = global_frame.saturating_sub(entry.global_offset);
    let frames_remaining = entry.local_duration.saturating_sub(frames_since_start);

    TimelineState {
        global_frame,
        total_duration,
        active: Some(ActiveSegment {
            index,
            frames_since_start,
            frames_remaining,
            local_duration: entry.local_duration,
        }),
        in_lead_in: false,
    }
}
