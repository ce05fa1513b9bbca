//! # Options (`config.rs`)
//!
//! Window, pacing and input settings read from a TOML file. Every key is optional and
//! [`Options::validate`] rejects values the engine cannot run with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::ConfigError;

/// Application options, usually read from a TOML file. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Initial window title
    #[serde(default = "default_title")]
    pub title: String,

    /// Initial window width in logical pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Initial window height in logical pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Start in borderless full screen
    #[serde(default)]
    pub fullscreen: bool,

    /// Desired frames per second (default: 60)
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,

    /// Maximum time between two presses of a double-click, in milliseconds (default: 300).
    /// Signed so that a negative value in a file is reported instead of failing to parse.
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: i64,

    /// Default log filter when `RUST_LOG` is not set (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_title() -> String {
    "Engine".to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_target_fps() -> u32 {
    60
}

fn default_double_click_ms() -> i64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            fullscreen: false,
            target_fps: default_target_fps(),
            double_click_ms: default_double_click_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Options {
    /// Load and validate options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.double_click_duration()?;
        if self.target_fps == 0 {
            return Err(ConfigError::ZeroTargetFps);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn double_click_duration(&self) -> Result<Duration, ConfigError> {
        u64::try_from(self.double_click_ms)
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::NegativeDoubleClickDuration(self.double_click_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let options = Options::from_toml_str("").unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.double_click_duration().unwrap(), Duration::from_millis(300));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let options = Options::from_toml_str("title = \"Viewer\"\ndouble_click_ms = 450\n").unwrap();

        assert_eq!(options.title, "Viewer");
        assert_eq!(options.double_click_ms, 450);
        assert_eq!(options.target_fps, 60);
    }

    #[test]
    fn negative_double_click_is_rejected() {
        let result = Options::from_toml_str("double_click_ms = -1");
        assert!(matches!(result, Err(ConfigError::NegativeDoubleClickDuration(-1))));
    }

    #[test]
    fn zero_fps_is_rejected() {
        let result = Options::from_toml_str("target_fps = 0");
        assert!(matches!(result, Err(ConfigError::ZeroTargetFps)));
    }

    #[test]
    fn zero_size_is_rejected() {
        let result = Options::from_toml_str("width = 0");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidWindowSize { width: 0, height: 720 })
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Options::from_toml_str("width = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Options::load("/nonexistent/engine.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
