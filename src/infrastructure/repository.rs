//! File system repository

use crate::domain::{ExportFile, RecordStorage};
use crate::error::{DiaryError, Result};
use crate::infrastructure::config::DIARY_DIR;
use crate::infrastructure::Config;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Abstract repository for diary directory operations
pub trait DiaryRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .nicediary/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .nicediary/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .nicediary directory exists
    fn is_initialized(&self) -> bool;

    /// Create .nicediary directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of DiaryRepository.
///
/// Records live as `<key>.json` files inside `.nicediary/`.
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Find the diary root: NICEDIARY_ROOT if set, otherwise the nearest
    /// ancestor of the current directory containing `.nicediary`
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("NICEDIARY_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_diary_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            }
            return Err(DiaryError::Config(format!(
                "NICEDIARY_ROOT is set to '{}' but no .nicediary directory found. \
                Run 'nicediary init' in that directory or unset NICEDIARY_ROOT.",
                path.display()
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` looking for a `.nicediary` directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_diary_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| DiaryError::NotDiaryDirectory(start.to_path_buf()))
    }

    fn has_diary_dir(path: &Path) -> bool {
        path.join(DIARY_DIR).is_dir()
    }

    fn diary_dir(&self) -> PathBuf {
        self.root.join(DIARY_DIR)
    }

    /// Path of the file backing record `key`
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.diary_dir().join(format!("{}.json", key))
    }

    /// First unused path for setting aside an unreadable record `key`:
    /// `{key}.corrupt.json`, then `{key}.corrupt.1.json`, `{key}.corrupt.2.json`, ...
    pub fn quarantine_path(&self, key: &str) -> PathBuf {
        let first = self.diary_dir().join(format!("{}.corrupt.json", key));
        if !first.exists() {
            return first;
        }
        (1u32..)
            .map(|n| self.diary_dir().join(format!("{}.corrupt.{}.json", key, n)))
            .find(|path| !path.exists())
            .unwrap_or(first)
    }

    /// Scratch file used while editing `name` in an external editor
    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.diary_dir().join(name)
    }

    /// Write an export into `dir` (relative paths resolve against the
    /// diary root), creating the directory if needed
    pub fn write_export(&self, dir: &Path, file: &ExportFile) -> Result<PathBuf> {
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.root.join(dir)
        };
        fs::create_dir_all(&dir)?;

        let path = dir.join(&file.file_name);
        fs::write(&path, &file.content)?;
        info!(path = %path.display(), mime = file.mime_type, "export written");
        Ok(path)
    }
}

impl DiaryRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_diary_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let diary_dir = self.diary_dir();

        if diary_dir.exists() {
            return Err(DiaryError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&diary_dir)?;
        Ok(())
    }
}

impl RecordStorage for FileSystemRepository {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DiaryError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key);
        debug!(path = %path.display(), bytes = value.len(), "writing record");
        fs::write(path, value).map_err(DiaryError::Io)
    }

    fn quarantine(&self, key: &str, value: &str) -> Result<String> {
        let path = self.quarantine_path(key);
        // create_new: an earlier quarantined copy is never overwritten
        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(value.as_bytes())?;

        match fs::remove_file(self.record_path(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(DiaryError::Io(e)),
            _ => Ok(path.display().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryStore, ExportFormat, RECORD_KEY};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn initialized() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        (temp, repo)
    }

    #[test]
    fn test_initialize_twice_fails() {
        let (_temp, repo) = initialized();
        assert!(repo.is_initialized());
        assert!(matches!(repo.initialize(), Err(DiaryError::Config(_))));
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let (temp, _repo) = initialized();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let found = FileSystemRepository::discover_from(&nested).unwrap();
        assert_eq!(found.root, temp.path());
    }

    #[test]
    fn test_discover_without_diary_fails() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            FileSystemRepository::discover_from(temp.path()),
            Err(DiaryError::NotDiaryDirectory(_))
        ));
    }

    #[test]
    fn test_missing_record_reads_as_none() {
        let (_temp, repo) = initialized();
        assert_eq!(repo.read(RECORD_KEY).unwrap(), None);
    }

    #[test]
    fn test_store_persists_to_record_file() {
        let (_temp, repo) = initialized();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let mut store = EntryStore::load(repo.clone()).unwrap();
        store.upsert(date, "on disk").unwrap();

        let raw = fs::read_to_string(repo.record_path(RECORD_KEY)).unwrap();
        assert_eq!(
            raw,
            r#"[{"date":"2024-01-05","content":"on disk","word_count":2}]"#
        );

        let reloaded = EntryStore::load(repo).unwrap();
        assert_eq!(reloaded.get(date).unwrap().content(), "on disk");
    }

    #[test]
    fn test_quarantine_moves_record_aside() {
        let (_temp, repo) = initialized();
        fs::write(repo.record_path(RECORD_KEY), "garbage").unwrap();
        let expected = repo.quarantine_path(RECORD_KEY);

        let (store, notice) = EntryStore::load_or_recover(repo.clone()).unwrap();
        assert_eq!(notice.unwrap().location, expected.display().to_string());
        assert!(store.is_empty());
        assert!(!repo.record_path(RECORD_KEY).exists());
        assert_eq!(fs::read_to_string(expected).unwrap(), "garbage");
    }

    #[test]
    fn test_second_quarantine_keeps_first_copy() {
        let (_temp, repo) = initialized();
        let diary = repo.root().join(DIARY_DIR);

        fs::write(repo.record_path(RECORD_KEY), "FIRST corrupt user data").unwrap();
        EntryStore::load_or_recover(repo.clone()).unwrap();
        fs::write(repo.record_path(RECORD_KEY), "SECOND corrupt").unwrap();
        let (_, notice) = EntryStore::load_or_recover(repo.clone()).unwrap();

        let second = diary.join("diaryEntries.corrupt.1.json");
        assert_eq!(notice.unwrap().location, second.display().to_string());
        assert_eq!(
            fs::read_to_string(diary.join("diaryEntries.corrupt.json")).unwrap(),
            "FIRST corrupt user data"
        );
        assert_eq!(fs::read_to_string(second).unwrap(), "SECOND corrupt");
        assert_eq!(
            repo.quarantine_path(RECORD_KEY),
            diary.join("diaryEntries.corrupt.2.json")
        );
    }

    #[test]
    fn test_write_export_relative_to_root() {
        let (temp, repo) = initialized();
        let file = ExportFile {
            file_name: ExportFormat::Markdown.file_name("notes"),
            mime_type: ExportFormat::Markdown.mime_type(),
            content: "# hi\n".to_string(),
        };

        let path = repo.write_export(Path::new("exports"), &file).unwrap();
        assert_eq!(path, temp.path().join("exports").join("notes.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# hi\n");
    }
}
