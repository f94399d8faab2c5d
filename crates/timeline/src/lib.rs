//! Filmroom Timeline: the clip-sequencing engine
//!
//! Turns an ordered clip selection into a global frame timeline and answers
//! per-frame questions about it:
//! - **Aggregation:** Prefix-sum offsets and total duration
//! - **Resolution:** Active segment, elapsed/remaining frames, progress, countdown
//! - **Templates:** Back-to-back, first-seconds and preview-grid layouts
//! - **Summaries:** Per-clip listing rows with duration classes
//!
//! This crate is pure computation with no I/O and no shared mutable state.
//! Build a [`Timeline`] once per render job and resolve frames against it
//! from as many threads as needed.

pub mod aggregator;
pub mod resolver;
pub mod summary;
pub mod template;

pub use aggregator::{compute_timeline, partition_valid, total_duration, Timeline, TimelineEntry};
pub use resolver::{resolve_frame, ActiveSegment, TimelineState};
pub use summary::{classify_durations, summarize, ClipSummary, DurationClass};
pub use template::{preview_grid, PreviewTile, Template};
