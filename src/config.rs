use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Where the dashboard looks for its data.
///
/// Read from `dashboard.json` in the working directory when present; any
/// missing field falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the sales data.
    pub data_dir: PathBuf,
    /// CSV file loaded at startup, relative to `data_dir`.
    pub data_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            data_file: "supermarket_sales.csv".to_string(),
        }
    }
}

impl AppConfig {
    pub const FILE_NAME: &'static str = "dashboard.json";

    /// Load the configuration, falling back to defaults when the file is
    /// absent or malformed (a malformed file is logged, not fatal).
    pub fn load() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        match Self::read_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    fn read_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Full path of the CSV loaded at startup.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_sample_csv() {
        let config = AppConfig::default();
        assert_eq!(
            config.data_path(),
            PathBuf::from("data").join("supermarket_sales.csv")
        );
    }

    #[test]
    fn partial_config_keeps_defaults_for_the_rest() {
        let config: AppConfig = serde_json::from_str(r#"{ "data_dir": "fixtures" }"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(config.data_file, "supermarket_sales.csv");
    }
}
