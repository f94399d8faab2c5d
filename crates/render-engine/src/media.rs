//! Media reference resolution.
//!
//! The external renderer either reads media bundled next to it (static
//! mode, referenced by bare file name) or streams it from the backend's
//! downloads route (remote mode). The mode is chosen per composition run.

use std::fmt;

use filmroom_common::config::{MediaMode, RenderDefaults};
use filmroom_project_model::video::VideoRecord;
use serde::Serialize;

/// Where the renderer loads a clip's media from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MediaRef {
    /// A file bundled with the renderer.
    StaticFile { file_name: String },
    /// A URL served by the backend.
    Remote { url: String },
}

impl MediaRef {
    /// The string the renderer's video element receives.
    pub fn as_str(&self) -> &str {
        match self {
            Self::StaticFile { file_name } => file_name,
            Self::Remote { url } => url,
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds media references for one composition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    mode: MediaMode,
    base_url: String,
    downloads_path: String,
}

impl MediaResolver {
    pub fn new(
        mode: MediaMode,
        base_url: impl Into<String>,
        downloads_path: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            base_url: base_url.into(),
            downloads_path: downloads_path.into(),
        }
    }

    /// Resolver using the configured backend and mode.
    pub fn from_defaults(defaults: &RenderDefaults) -> Self {
        Self::new(
            defaults.media_mode,
            defaults.backend_base_url.clone(),
            defaults.downloads_path.clone(),
        )
    }

    /// Same backend, different mode.
    pub fn with_mode(mut self, mode: MediaMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> MediaMode {
        self.mode
    }

    /// Reference for `video`, or `None` when it has no media file.
    pub fn resolve(&self, video: &VideoRecord) -> Option<MediaRef> {
        let file_name = video.file_name()?;
        Some(match self.mode {
            MediaMode::StaticFile => MediaRef::StaticFile {
                file_name: file_name.to_string(),
            },
            MediaMode::Remote => MediaRef::Remote {
                url: self.remote_url(file_name),
            },
        })
    }

    fn remote_url(&self, file_name: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let segment = self.downloads_path.trim_matches('/');
        if segment.is_empty() {
            format!("{base}/{file_name}")
        } else {
            format!("{base}/{segment}/{file_name}")
        }
    }
}

impl Default for MediaResolver {
    fn default() -> Self {
        Self::from_defaults(&RenderDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(filepath: Option<&str>) -> VideoRecord {
        VideoRecord {
            id: 1,
            name: "Game 1".to_string(),
            filepath: filepath.map(str::to_string),
            metadata: None,
        }
    }

    #[test]
    fn test_remote_url_from_defaults() {
        let resolver = MediaResolver::default();
        let media = resolver.resolve(&video(Some("/srv/uploads/game1.mp4"))).unwrap();
        assert_eq!(media.as_str(), "http://localhost:5000/downloads/game1.mp4");
    }

    #[test]
    fn test_static_file_uses_bare_name() {
        let resolver = MediaResolver::default().with_mode(MediaMode::StaticFile);
        let media = resolver.resolve(&video(Some("/srv/uploads/game1.mp4"))).unwrap();
        assert_eq!(
            media,
            MediaRef::StaticFile {
                file_name: "game1.mp4".to_string()
            }
        );
    }

    #[test]
    fn test_slashes_are_normalized() {
        let resolver = MediaResolver::new(MediaMode::Remote, "https://films.example/", "/media/");
        let media = resolver.resolve(&video(Some("a/b.mp4"))).unwrap();
        assert_eq!(media.to_string(), "https://films.example/media/b.mp4");

        let resolver = MediaResolver::new(MediaMode::Remote, "https://films.example", "");
        let media = resolver.resolve(&video(Some("b.mp4"))).unwrap();
        assert_eq!(media.to_string(), "https://films.example/b.mp4");
    }

    #[test]
    fn test_video_without_file_has_no_reference() {
        assert!(MediaResolver::default().resolve(&video(None)).is_none());
        assert!(MediaResolver::default().resolve(&video(Some("/dir/"))).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let media = MediaRef::Remote {
            url: "http://x/y.mp4".to_string(),
        };
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["mode"], "remote");
        assert_eq!(json["url"], "http://x/y.mp4");
    }
}
