//! Dashboard preferences and their persistence
//!
//! Stored as TOML under the user's config directory. Missing or unreadable
//! files fall back to defaults; missing fields take their default values.

use std::path::{Path, PathBuf};

use meridian_charts::DisplayMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_RING_HEIGHT: f32 = 240.0;
const DEFAULT_SPARK_WIDTH: f32 = 180.0;
const DEFAULT_SPARK_HEIGHT: f32 = 48.0;

/// Errors reading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Chart sizing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPrefs {
    /// Ring chart canvas height
    pub ring_height: f32,
    /// Sparkline canvas width
    pub spark_width: f32,
    /// Sparkline canvas height
    pub spark_height: f32,
    /// Whether ring charts show their legend
    pub legend_visible: bool,
}

impl Default for ChartPrefs {
    fn default() -> Self {
        Self {
            ring_height: DEFAULT_RING_HEIGHT,
            spark_width: DEFAULT_SPARK_WIDTH,
            spark_height: DEFAULT_SPARK_HEIGHT,
            legend_visible: true,
        }
    }
}

impl ChartPrefs {
    /// Clamp sizes to a usable range
    pub fn clamp(&mut self) {
        self.ring_height = sanitize(self.ring_height, DEFAULT_RING_HEIGHT).clamp(120.0, 600.0);
        self.spark_width = sanitize(self.spark_width, DEFAULT_SPARK_WIDTH).clamp(60.0, 600.0);
        self.spark_height = sanitize(self.spark_height, DEFAULT_SPARK_HEIGHT).clamp(24.0, 200.0);
    }
}

fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Main dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Light or dark presentation
    pub display_mode: DisplayMode,
    /// Window size (width, height)
    pub window_size: (u32, u32),
    /// Chart sizing
    pub charts: ChartPrefs,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Light,
            window_size: (1100, 760),
            charts: ChartPrefs::default(),
        }
    }
}

impl DashConfig {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("meridian").join("dashboard.toml"))
    }

    /// Load from `path`, or the default location when `None`, falling back
    /// to defaults on any failure
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(path) => path,
            None => return Self::default(),
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "using default config");
                Self::default()
            }
        }
    }

    /// Load and clamp the config at `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.clamp();
        Ok(config)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_error)
    }

    /// Clamp every range-limited field
    pub fn clamp(&mut self) {
        self.charts.clamp();
        self.window_size = (
            self.window_size.0.clamp(480, 7680),
            self.window_size.1.clamp(360, 4320),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.display_mode, DisplayMode::Light);
        assert!(config.charts.legend_visible);
        assert_eq!(config.window_size, (1100, 760));
    }

    #[test]
    fn test_clamp() {
        let mut config = DashConfig {
            window_size: (10, 100_000),
            charts: ChartPrefs {
                ring_height: 5.0,
                spark_width: f32::NAN,
                spark_height: 999.0,
                legend_visible: false,
            },
            ..DashConfig::default()
        };
        config.clamp();
        assert_eq!(config.window_size, (480, 4320));
        assert_eq!(config.charts.ring_height, 120.0);
        assert_eq!(config.charts.spark_width, DEFAULT_SPARK_WIDTH);
        assert_eq!(config.charts.spark_height, 200.0);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.toml");

        let config = DashConfig {
            display_mode: DisplayMode::Dark,
            window_size: (1280, 800),
            ..DashConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = DashConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "display_mode = \"dark\"\n").unwrap();

        let loaded = DashConfig::load(Some(&path));
        assert_eq!(loaded.display_mode, DisplayMode::Dark);
        assert_eq!(loaded.charts, ChartPrefs::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "display_mode = 42").unwrap();

        assert!(matches!(DashConfig::load_from(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(DashConfig::load(Some(&path)), DashConfig::default());
    }
}
