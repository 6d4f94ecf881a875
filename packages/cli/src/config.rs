use poster_editor::{EditorConfig, DEFAULT_EXPORT_FILE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "poster.config.json";

/// Poster project configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing poster .html files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Output directory for sanitized and exported files
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// File name used when exporting a single poster
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Editing session options
    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_src_dir() -> String {
    "posters".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    /// Get absolute path to output directory, preferring an override
    pub fn get_out_dir(&self, cwd: &str, override_dir: Option<&str>) -> PathBuf {
        PathBuf::from(cwd).join(override_dir.unwrap_or(self.out_dir.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            export_file: default_export_file(),
            editor: EditorConfig::default(),
        }
    }
}
