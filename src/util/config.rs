use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::errors::{DashboardError, Result};

use super::logging::LogLevel;

#[derive(Deserialize, Debug, Clone)]
pub struct DashboardConfig {
    pub csv_path: PathBuf,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default = "DashboardConfig::default_top_n")]
    pub top_n: usize,

    #[serde(default = "DashboardConfig::default_window_weeks")]
    pub window_weeks: u32,
}

impl DashboardConfig {
    pub const FILE_NAME: &'static str = "dashboard.toml";

    /// About a century of weeks.
    pub const MAX_WINDOW_WEEKS: u32 = 5200;

    fn default_top_n() -> usize {
        5
    }

    fn default_window_weeks() -> u32 {
        4
    }

    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            log_level: LogLevel::default(),
            top_n: Self::default_top_n(),
            window_weeks: Self::default_window_weeks(),
        }
    }

    /// Reads `dashboard.toml` from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        let dir = std::env::current_dir().map_err(|source| DashboardError::Io {
            path: PathBuf::from("."),
            source,
        })?;

        Self::from_file(dir.join(Self::FILE_NAME))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml(&content)?;
        if config.csv_path.is_relative() {
            if let Some(parent) = path.parent() {
                config.csv_path = parent.join(&config.csv_path);
            }
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|err| DashboardError::Config(err.to_string()))?;

        if config.window_weeks == 0 || config.window_weeks > Self::MAX_WINDOW_WEEKS {
            return Err(DashboardError::Config(format!(
                "window_weeks must be between 1 and {}, got {}",
                Self::MAX_WINDOW_WEEKS,
                config.window_weeks
            )));
        }

        Ok(config)
    }
}
