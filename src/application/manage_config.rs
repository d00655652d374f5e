//! Config management use case

use crate::domain::ExportFormat;
use crate::error::{DiaryError, Result};
use crate::infrastructure::{Config, DiaryRepository, FileSystemRepository};

const KEYS: &str = "editor, autosave_ms, export_name, export_format, created";

/// Service for managing diary configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "editor" => Ok(config.editor),
            "autosave_ms" => Ok(config.autosave_ms.to_string()),
            "export_name" => Ok(config.export_name),
            "export_format" => Ok(config.export_format.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "editor" => config.editor = value.to_string(),
            "autosave_ms" => {
                config.autosave_ms = value.parse().map_err(|_| {
                    DiaryError::Config(format!(
                        "autosave_ms must be a whole number of milliseconds, got '{}'",
                        value
                    ))
                })?;
            }
            "export_name" => config.export_name = value.trim().to_string(),
            "export_format" => config.export_format = value.parse::<ExportFormat>()?,
            "created" => {
                return Err(DiaryError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> DiaryError {
    DiaryError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, KEYS
    ))
}
