//! Error types for nicediary

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the diary
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Not a nicediary directory: {0}")]
    NotDiaryDirectory(PathBuf),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No entry for {0}")]
    EntryNotFound(String),

    #[error("You have no entries to export yet!")]
    NothingToExport,

    #[error("No entries selected for export")]
    NothingSelected,

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Stored entries could not be read: {0}")]
    CorruptRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl DiaryError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DiaryError::NotDiaryDirectory(_) => 2,
            DiaryError::InvalidDate(_) => 3,
            DiaryError::EntryNotFound(_) => 4,
            DiaryError::NothingToExport | DiaryError::NothingSelected => 5,
            DiaryError::CorruptRecord(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DiaryError::NotDiaryDirectory(path) => {
                format!(
                    "Not a nicediary directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'nicediary init' in this directory to start a diary\n\
                    • Navigate to an existing diary directory\n\
                    • Set NICEDIARY_ROOT environment variable to your diary path",
                    path.display()
                )
            }
            DiaryError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday, tomorrow\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, next friday, etc.\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2024-01-05)",
                    input
                )
            }
            DiaryError::NothingToExport => {
                "You have no entries to export yet!\n\n\
                Write one first: nicediary write today --text \"...\""
                    .to_string()
            }
            DiaryError::NothingSelected => {
                "No entries selected for export\n\n\
                Suggestions:\n\
                • Pass --all to export every entry\n\
                • Pick entries with --date YYYY-MM-DD (repeatable)"
                    .to_string()
            }
            DiaryError::UnknownFormat(format) => {
                format!(
                    "Unknown export format: '{}'\n\n\
                    Valid formats: txt, md, html, json",
                    format
                )
            }
            DiaryError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: nicediary config editor 'vim'\n\
                    • Skip the editor: nicediary write --text \"...\"",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DiaryError
pub type Result<T> = std::result::Result<T, DiaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_diary_directory_suggestion() {
        let err = DiaryError::NotDiaryDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("nicediary init"));
        assert!(msg.contains("NICEDIARY_ROOT"));
    }

    #[test]
    fn test_invalid_date_examples() {
        let msg = DiaryError::InvalidDate("someday".to_string()).display_with_suggestions();
        assert!(msg.contains("'someday'"));
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("last monday"));
    }

    #[test]
    fn test_unknown_format_lists_formats() {
        let msg = DiaryError::UnknownFormat("pdf".to_string()).display_with_suggestions();
        assert!(msg.contains("txt, md, html, json"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DiaryError::NotDiaryDirectory(PathBuf::new()).exit_code(), 2);
        assert_eq!(DiaryError::InvalidDate(String::new()).exit_code(), 3);
        assert_eq!(DiaryError::NothingToExport.exit_code(), 5);
        assert_eq!(DiaryError::NothingSelected.exit_code(), 5);
        assert_eq!(DiaryError::Config(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = DiaryError::Config("bad key".to_string());
        assert_eq!(err.display_with_suggestions(), "Configuration error: bad key");
    }
}
