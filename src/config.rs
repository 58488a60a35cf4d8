//! Configuration file parser for ~/.config/reelview/config.toml.
//!
//! The file is optional: a missing or empty file yields `Config::default()`.
//! Unknown keys are accepted but logged, since they are usually typos.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::engine::{NavSettings, ViewSettings};
use crate::media::MediaKind;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Top-level application configuration. Any subset of keys may be given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Feed locations: `http(s)://` URLs or local JSON file paths.
    pub photos_source: String,
    pub videos_source: String,
    pub reels_source: String,

    /// Pause before a growth request is issued.
    pub growth_delay_ms: u64,

    /// Wheel deltas at or below this magnitude are ignored.
    pub wheel_threshold: f64,
    pub wheel_cooldown_ms: u64,
    /// Cooldown between keyboard advances; 0 disables it.
    pub key_cooldown_ms: u64,

    /// Shuffle the video feed on each initial load.
    pub shuffle_videos: bool,

    pub description_preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            photos_source: "data/photofeed.json".to_string(),
            videos_source: "data/videofeed.json".to_string(),
            reels_source: "data/reelfeed.json".to_string(),
            growth_delay_ms: 800,
            wheel_threshold: 30.0,
            wheel_cooldown_ms: 600,
            key_cooldown_ms: 0,
            shuffle_videos: true,
            description_preview_chars: 80,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 10] = [
        "theme",
        "photos_source",
        "videos_source",
        "reels_source",
        "growth_delay_ms",
        "wheel_threshold",
        "wheel_cooldown_ms",
        "key_cooldown_ms",
        "shuffle_videos",
        "description_preview_chars",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing, empty, or whitespace-only file → `Ok(Config::default())`
    /// - Invalid TOML or wrong value types → `Err(ConfigError::Parse)`
    /// - File over 1 MB → `Err(ConfigError::TooLarge)` without reading it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse TOML text, warning about keys this version does not know.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(theme = %config.theme, "Loaded configuration");
        Ok(config)
    }

    /// Feed location configured for a media kind.
    pub fn source_for(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Photo => &self.photos_source,
            MediaKind::Video => &self.videos_source,
            MediaKind::Reel => &self.reels_source,
        }
    }

    pub fn set_source(&mut self, kind: MediaKind, location: impl Into<String>) {
        let slot = match kind {
            MediaKind::Photo => &mut self.photos_source,
            MediaKind::Video => &mut self.videos_source,
            MediaKind::Reel => &mut self.reels_source,
        };
        *slot = location.into();
    }

    /// Engine settings for one view. A non-finite or negative wheel
    /// threshold falls back to the default.
    pub fn view_settings(&self, kind: MediaKind) -> ViewSettings {
        let defaults = NavSettings::default();
        let wheel_threshold = if self.wheel_threshold.is_finite() && self.wheel_threshold >= 0.0 {
            self.wheel_threshold
        } else {
            tracing::warn!(
                value = self.wheel_threshold,
                "Invalid wheel_threshold, using default"
            );
            defaults.wheel_threshold
        };

        ViewSettings {
            nav: NavSettings {
                wheel_threshold,
                wheel_cooldown: Duration::from_millis(self.wheel_cooldown_ms),
                key_cooldown: Duration::from_millis(self.key_cooldown_ms),
            },
            growth_delay: Duration::from_millis(self.growth_delay_ms),
            preview_chars: self.description_preview_chars,
            scroll_threshold: None,
            shuffle: (kind == MediaKind::Video).then_some(self.shuffle_videos),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
