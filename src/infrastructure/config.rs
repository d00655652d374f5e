//! Configuration management

use crate::domain::export::DEFAULT_EXPORT_NAME;
use crate::domain::{DebounceTimer, ExportFormat};
use crate::error::{DiaryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the marker directory holding config and entries
pub const DIARY_DIR: &str = ".nicediary";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub editor: String,
    #[serde(default = "default_autosave_ms")]
    pub autosave_ms: u64,
    #[serde(default = "default_export_name")]
    pub export_name: String,
    #[serde(default)]
    pub export_format: ExportFormat,
    pub created: DateTime<Utc>,
}

fn default_autosave_ms() -> u64 {
    DebounceTimer::DEFAULT_QUIET_PERIOD.as_millis() as u64
}

fn default_export_name() -> String {
    DEFAULT_EXPORT_NAME.to_string()
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            editor: Self::detect_default_editor(),
            autosave_ms: default_autosave_ms(),
            export_name: default_export_name(),
            export_format: ExportFormat::default(),
            created: Utc::now(),
        }
    }

    /// Load config from .nicediary/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(DIARY_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DiaryError::NotDiaryDirectory(path.to_path_buf())
            } else {
                DiaryError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| DiaryError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .nicediary/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let diary_dir = path.join(DIARY_DIR);

        if !diary_dir.exists() {
            fs::create_dir(&diary_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(diary_dir.join("config.toml"), contents)?;

        Ok(())
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.editor.clone())
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_ms)
    }

    fn detect_default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
