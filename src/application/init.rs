//! Initialize diary use case

use crate::error::Result;
use crate::infrastructure::{Config, DiaryRepository, FileSystemRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new diary at the specified path.
pub fn init(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new())?;
    info!(root = %path.display(), "diary initialized");

    println!("Initialized nicediary at {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("journal");

        init(&target).unwrap();

        let repo = FileSystemRepository::new(target);
        assert!(repo.is_initialized());
        assert_eq!(repo.load_config().unwrap().autosave_ms, 1000);
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();
        assert!(init(temp.path()).is_err());
    }
}
