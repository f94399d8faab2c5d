//! Frame clock utilities.
//!
//! Every Filmroom composition runs on a fixed integer frame rate. This
//! module converts between frame counts and wall time and formats the
//! countdowns shown next to the active clip.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A whole-number composition frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameRate(u32);

impl FrameRate {
    /// The rate every composition renders at.
    pub const COMPOSITION: FrameRate = FrameRate(30);

    /// Create a frame rate. Zero is clamped to 1 fps.
    pub fn new(fps: u32) -> Self {
        Self(fps.max(1))
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.0
    }

    /// Convert a frame count to fractional seconds.
    pub fn frames_to_secs(&self, frames: u64) -> f64 {
        frames as f64 / self.0 as f64
    }

    /// Convert seconds to a frame count (rounded down).
    pub fn secs_to_frames(&self, secs: f64) -> u64 {
        (secs.max(0.0) * self.0 as f64).floor() as u64
    }

    /// Whole-second countdown for the given number of remaining frames.
    pub fn countdown(&self, frames_remaining: u64) -> Countdown {
        Countdown::from_secs(frames_remaining / self.0 as u64)
    }

    /// Clip-length label with one decimal place, e.g. `"5.0s"`.
    pub fn format_secs_tenths(&self, frames: u64) -> String {
        format!("{:.1}s", self.frames_to_secs(frames))
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::COMPOSITION
    }
}

/// A `minutes:seconds` countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Countdown {
    pub minutes: u64,
    pub seconds: u8,
}

impl Countdown {
    /// Split whole seconds into minutes and seconds.
    pub fn from_secs(total_secs: u64) -> Self {
        Self {
            minutes: total_secs / 60,
            seconds: (total_secs % 60) as u8,
        }
    }

    /// Total whole seconds represented.
    pub fn total_secs(&self) -> u64 {
        self.minutes * 60 + self.seconds as u64
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}
