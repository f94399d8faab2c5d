//! Filmroom Common Utilities
//!
//! Shared infrastructure for all Filmroom crates:
//! - Error types and result aliases
//! - Frame clock utilities (frame rates, countdowns)
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
