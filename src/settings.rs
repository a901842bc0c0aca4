//! Persisted user settings for coverage sessions.
//!
//! Settings are stored as TOML. Missing keys take their defaults, so a file
//! written by an older version still loads.
//!
//! ```
//! use gridcover::CoverageSettings;
//!
//! let settings = CoverageSettings::from_toml_str("max_grid_extent_m = 250.0").unwrap();
//! assert_eq!(settings.max_grid_extent_m, 250.0);
//! assert!(settings.autosave_enabled);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest allowed grid extent cap, in meters.
pub const MIN_GRID_EXTENT_M: f64 = 10.0;
/// Largest allowed grid extent cap, in meters.
pub const MAX_GRID_EXTENT_M: f64 = 10_000.0;

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to write settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is outside its allowed range.
    #[error("setting `{key}` is out of range: {value}")]
    OutOfRange { key: &'static str, value: String },
}

/// User-adjustable limits and autosave behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageSettings {
    /// Largest bounding-box side, in meters, a session will grid.
    pub max_grid_extent_m: f64,
    pub autosave_enabled: bool,
    pub autosave_interval_ms: u64,
    /// Directory of the last opened or saved project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_directory: Option<PathBuf>,
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            max_grid_extent_m: 500.0,
            autosave_enabled: true,
            autosave_interval_ms: 60_000,
            last_directory: None,
        }
    }
}

impl CoverageSettings {
    /// Parses settings from TOML, filling missing keys with defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(self)?)
    }

    /// Checks every value against its allowed range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let extent = self.max_grid_extent_m;
        if !(MIN_GRID_EXTENT_M..=MAX_GRID_EXTENT_M).contains(&extent) {
            return Err(SettingsError::OutOfRange {
                key: "max_grid_extent_m",
                value: extent.to_string(),
            });
        }
        if self.autosave_interval_ms == 0 {
            return Err(SettingsError::OutOfRange {
                key: "autosave_interval_ms",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_gives_defaults() {
        let settings = CoverageSettings::from_toml_str("").unwrap();
        assert_eq!(settings, CoverageSettings::default());
    }

    #[test]
    fn test_partial_source() {
        let source = r#"
            autosave_enabled = false
            last_directory = "/home/grower/projects"
        "#;
        let settings = CoverageSettings::from_toml_str(source).unwrap();
        assert!(!settings.autosave_enabled);
        assert_eq!(settings.autosave_interval_ms, 60_000);
        assert_eq!(
            settings.last_directory,
            Some(PathBuf::from("/home/grower/projects"))
        );
    }

    #[test]
    fn test_out_of_range() {
        let err = CoverageSettings::from_toml_str("max_grid_extent_m = 5.0").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                key: "max_grid_extent_m",
                ..
            }
        ));

        let err = CoverageSettings::from_toml_str("autosave_interval_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                key: "autosave_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = CoverageSettings::from_toml_str("max_grid_extent_m = \"wide\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = CoverageSettings {
            max_grid_extent_m: 1200.0,
            autosave_enabled: false,
            autosave_interval_ms: 30_000,
            last_directory: Some(PathBuf::from("/tmp/greenhouses")),
        };
        let text = settings.to_toml_string().unwrap();
        assert!(text.contains("max_grid_extent_m = 1200.0"));
        assert_eq!(CoverageSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CoverageSettings::load("/nonexistent/gridcover/settings.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
