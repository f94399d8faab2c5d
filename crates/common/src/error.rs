//! Error types shared across Filmroom crates.

use std::path::PathBuf;

/// Top-level error type for Filmroom operations.
#[derive(Debug, thiserror::Error)]
pub enum FilmroomError {
    #[error("Invalid clip {key}: {reason}")]
    InvalidClip { key: String, reason: String },

    #[error("Clip {key} references unknown video {video_id}")]
    MissingVideo { video_id: i64, key: String },

    #[error("Nothing to render: the composition has no frames")]
    DegenerateTimeline,

    #[error("Segment {key} has zero length")]
    ZeroLengthSegment { key: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FilmroomError.
pub type FilmroomResult<T> = Result<T, FilmroomError>;

impl FilmroomError {
    pub fn invalid_clip(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidClip {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_video(video_id: i64, key: impl Into<String>) -> Self {
        Self::MissingVideo {
            video_id,
            key: key.into(),
        }
    }

    pub fn zero_length_segment(key: impl Into<String>) -> Self {
        Self::ZeroLengthSegment { key: key.into() }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error means "there is nothing to render" rather than a failure.
    pub fn is_nothing_to_render(&self) -> bool {
        matches!(self, Self::DegenerateTimeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_clip_message_names_key() {
        let err = FilmroomError::invalid_clip("7-goal-10-20-10", "end frame must be after start");
        let msg = err.to_string();
        assert!(msg.contains("7-goal-10-20-10"));
        assert!(msg.contains("end frame must be after start"));
    }

    #[test]
    fn test_degenerate_timeline_is_nothing_to_render() {
        assert!(FilmroomError::DegenerateTimeline.is_nothing_to_render());
        assert!(!FilmroomError::render("boom").is_nothing_to_render());
    }
}
