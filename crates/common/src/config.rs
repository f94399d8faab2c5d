//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Composition defaults.
    #[serde(default)]
    pub render: RenderDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How media references are resolved for the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaMode {
    /// Media files are pre-staged next to the renderer bundle.
    StaticFile,
    /// Media is streamed from the backend's downloads route.
    #[default]
    Remote,
}

impl MediaMode {
    /// Map the renderer's `useStaticFile` flag to a mode.
    pub fn from_static_flag(use_static_file: bool) -> Self {
        if use_static_file {
            Self::StaticFile
        } else {
            Self::Remote
        }
    }
}

/// Default composition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Output frame rate.
    pub fps: u32,

    /// Media resolution mode when the props file does not say.
    pub media_mode: MediaMode,

    /// Backend base URL used in remote mode.
    pub backend_base_url: String,

    /// Path segment under the backend that serves media files.
    pub downloads_path: String,

    /// Frame size used when video metadata is absent or malformed.
    pub fallback_width: u32,
    pub fallback_height: u32,

    /// Length of the preview grid lead-in.
    pub preview_frames: u64,

    /// Frames taken from each clip by the first-seconds template.
    pub first_seconds_frames: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "filmroom=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            media_mode: MediaMode::Remote,
            backend_base_url: "http://localhost:5000".to_string(),
            downloads_path: "downloads".to_string(),
            fallback_width: 1080,
            fallback_height: 1080,
            preview_frames: 300,
            first_seconds_frames: 150,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("filmroom").join("config.json")
}
