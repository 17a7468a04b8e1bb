//! Optional chart configuration
//!
//! Loads overrides (output directory, grid resolution, stats host, font)
//! from a config/shotchart.toml file. A missing file is not an error; a
//! broken file logs a warning and falls back to defaults.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GRID_SIZE;

/// Path to the chart config file
pub const CONFIG_FILE: &str = "config/shotchart.toml";

pub const DEFAULT_BASE_URL: &str = "https://stats.nba.com/stats";

fn default_output_dir() -> String {
    "charts".to_string()
}
fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Directory PNG charts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Hex grid resolution along the x extent
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    /// Stats API host, overridable for testing against a local server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// TTF font for the title and legend labels (probed if unset)
    #[serde(default)]
    pub font_path: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            grid_size: default_grid_size(),
            base_url: default_base_url(),
            font_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ChartConfig {
    /// Load config from file, or return defaults if the file doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let config = ChartConfig::load_from(Path::new("/nonexistent/shotchart.toml"));
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.font_path.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shotchart.toml");
        let mut file = fs::File::create(&path).expect("create config");
        writeln!(file, "grid_size = 40").expect("write config");

        let config = ChartConfig::load_from(&path);
        assert_eq!(config.grid_size, 40);
        assert_eq!(config.output_dir, "charts");
    }

    #[test]
    fn broken_file_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shotchart.toml");
        fs::write(&path, "grid_size = \"not a number").expect("write config");

        let config = ChartConfig::load_from(&path);
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
    }
}
