//! Filmroom Render Engine
//!
//! Prepares a clip selection for the external renderer. Nothing here
//! decodes or encodes video; the output is the plan the renderer follows
//! and the per-frame values it draws.
//!
//! # Pipeline Architecture
//!
//! ```text
//! props.json ──┐
//!              ├── Skip clips without a placeable video
//! videos ──────┘         │
//!                        ├── Template layout (timeline)
//!                        │         │
//!                        │         ├── Metadata (duration, size, fps)
//!                        │         ├── Placements (source range, media ref)
//!                        │         └── Preview grid
//!                        ▼
//!                 CompositionPlan ──── Arc ───┐
//!                                             ├── worker 0: frames [0, k)
//!                                             ├── worker 1: frames [k, 2k)
//!                                             └── ...
//!                                                      │
//!                                                      ▼
//!                                           frames.jsonl (FrameParams)
//! ```

pub mod composition;
pub mod frame_sheet;
pub mod media;
pub mod overlay;
pub mod placement;

pub use composition::{
    calculate_metadata, prepare_composition, CompositionMetadata, CompositionOptions,
    CompositionPlan, SkippedClip,
};
pub use frame_sheet::{
    build_frame_sheet, write_json_lines, FrameParams, SheetProgress, SheetProgressCallback,
};
pub use media::{MediaRef, MediaResolver};
pub use overlay::{scale_box, to_tracking_frame, OverlayBox, TrackingOverlay};
pub use placement::{to_placement, Placement};
