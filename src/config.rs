use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CSV_LENS_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "csv-lens.json";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// User-tunable settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Height of one table row in points.
    pub row_height: f32,
    /// Suggested file name in the export dialog.
    pub export_file_name: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
            row_height: 20.0,
            export_file_name: "filtered_data.csv".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the config for this process: `$CSV_LENS_CONFIG`, then
    /// `./csv-lens.json`, then defaults. A broken file is logged and
    /// ignored.
    pub fn load() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    fn load_from(explicit: Option<&Path>, fallback: &Path) -> Self {
        let path = match explicit {
            Some(p) => p,
            None if fallback.exists() => fallback,
            None => return Self::default(),
        };
        match Self::from_file(path) {
            Ok(cfg) => {
                log::info!("Using config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{ "row_height": 24.0 }"#).unwrap();

        let cfg = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(cfg.row_height, 24.0);
        assert_eq!(cfg.export_file_name, "filtered_data.csv");
        assert_eq!(cfg.window_width, 1200.0);
    }

    #[test]
    fn explicit_path_wins_over_fallback() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.json");
        let fallback = dir.path().join("csv-lens.json");
        std::fs::write(&explicit, r#"{ "export_file_name": "out.csv" }"#).unwrap();
        std::fs::write(&fallback, r#"{ "export_file_name": "other.csv" }"#).unwrap();

        let cfg = ViewerConfig::load_from(Some(&explicit), &fallback);
        assert_eq!(cfg.export_file_name, "out.csv");

        let cfg = ViewerConfig::load_from(None, &fallback);
        assert_eq!(cfg.export_file_name, "other.csv");
    }

    #[test]
    fn missing_or_broken_files_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let absent = dir.path().join("absent.json");
        assert_eq!(ViewerConfig::load_from(None, &absent), ViewerConfig::default());
        assert_eq!(
            ViewerConfig::load_from(Some(&absent), &absent),
            ViewerConfig::default()
        );

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(ViewerConfig::from_file(&broken).is_err());
        assert_eq!(
            ViewerConfig::load_from(Some(&broken), &absent),
            ViewerConfig::default()
        );
    }
}
