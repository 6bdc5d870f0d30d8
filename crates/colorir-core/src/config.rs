//! User configuration, stored as JSON.

use crate::fill::FillPolicy;
use crate::tools::DEFAULT_ERASER_WIDTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for a drawing session. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorirConfig {
    pub fill: FillPolicy,
    pub line_width: u32,
    pub eraser_width: u32,
    /// Stroke width of rendered outlines, in outline units (scaled by the fit).
    pub outline_stroke_width: f64,
    pub narration_debounce_ms: u64,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl Default for ColorirConfig {
    fn default() -> Self {
        Self {
            fill: FillPolicy::STRICT,
            line_width: 5,
            eraser_width: DEFAULT_ERASER_WIDTH,
            outline_stroke_width: 2.0,
            narration_debounce_ms: 500,
            surface_width: 800,
            surface_height: 600,
        }
    }
}

impl ColorirConfig {
    /// Parse configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/colorir/config.json`
    ///
    /// On Linux: `~/.config/colorir/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("colorir").join("config.json"))
    }

    pub fn narration_debounce(&self) -> Duration {
        Duration::from_millis(self.narration_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::Connectivity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ColorirConfig::default();
        assert_eq!(config.fill, FillPolicy::STRICT);
        assert_eq!(config.line_width, 5);
        assert_eq!(config.eraser_width, 50);
        assert_eq!(config.narration_debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ColorirConfig::from_json(
            r#"{ "fill": { "tolerance": 25, "connectivity": "eight" }, "line_width": 8 }"#,
        )
        .unwrap();
        assert_eq!(config.fill, FillPolicy::LENIENT);
        assert_eq!(config.fill.connectivity, Connectivity::Eight);
        assert_eq!(config.line_width, 8);
        assert_eq!(config.eraser_width, 50);
        assert_eq!(config.surface_width, 800);
    }

    #[test]
    fn test_partial_fill_policy_uses_defaults() {
        let config = ColorirConfig::from_json(r#"{ "fill": { "connectivity": "eight" } }"#).unwrap();
        assert_eq!(config.fill.tolerance, 10);
        assert_eq!(config.fill.connectivity, Connectivity::Eight);

        let config = ColorirConfig::from_json(r#"{ "fill": { "tolerance": 0 } }"#).unwrap();
        assert_eq!(config.fill.tolerance, 0);
        assert_eq!(config.fill.connectivity, Connectivity::Four);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "surface_width": 320, "surface_height": 240 }}"#).unwrap();
        let config = ColorirConfig::load(file.path()).unwrap();
        assert_eq!((config.surface_width, config.surface_height), (320, 240));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ColorirConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(ColorirConfig::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_json_round_trip() {
        let config = ColorirConfig {
            fill: FillPolicy::LENIENT,
            ..ColorirConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ColorirConfig::from_json(&json).unwrap(), config);
    }
}
