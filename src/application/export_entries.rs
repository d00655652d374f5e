//! Export entries use case

use crate::application::DiarySession;
use crate::domain::{resolve_date, ExportFormat};
use crate::error::{DiaryError, Result};
use crate::infrastructure::{DiaryRepository, FileSystemRepository};
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Options for exporting entries
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Export every entry
    pub all: bool,
    /// Date references to export when `all` is false
    pub dates: Vec<String>,
    /// Format name; the configured default when absent
    pub format: Option<String>,
    /// Base file name; the configured default when absent
    pub name: Option<String>,
    /// Output directory; the diary root when absent
    pub out_dir: Option<PathBuf>,
}

/// Service for exporting a selection of entries to a file
pub struct ExportService {
    repository: FileSystemRepository,
}

impl ExportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ExportService { repository }
    }

    /// Export and return the path of the written file
    pub fn execute(&self, options: &ExportOptions) -> Result<PathBuf> {
        self.execute_on(Local::now().date_naive(), options)
    }

    pub fn execute_on(&self, today: NaiveDate, options: &ExportOptions) -> Result<PathBuf> {
        let config = self.repository.load_config()?;
        let format = match &options.format {
            Some(name) => name.parse::<ExportFormat>()?,
            None => config.export_format,
        };
        let base_name = options.name.as_deref().unwrap_or(&config.export_name);

        let mut session = DiarySession::open(&self.repository, today)?;
        session.open_export()?;

        if options.all {
            session.toggle_export_all();
        } else {
            let dates = options
                .dates
                .iter()
                .map(|d| resolve_date(d, today))
                .collect::<Result<BTreeSet<_>>>()?;
            for date in dates {
                if !session.toggle_export(date) {
                    return Err(DiaryError::EntryNotFound(date.to_string()));
                }
            }
        }

        let file = session.download_export(format, base_name)?;
        let out_dir = options
            .out_dir
            .clone()
            .unwrap_or_else(|| self.repository.root().to_path_buf());
        self.repository.write_export(&out_dir, &file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::WriteEntryService;
    use crate::infrastructure::Config;
    use std::fs;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup(entries: &[(&str, &str)]) -> (TempDir, ExportService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new()).unwrap();

        let writer = WriteEntryService::new(repo.clone());
        for (d, text) in entries {
            writer
                .execute_on(date("2024-01-10"), d, Some(text.to_string()))
                .unwrap();
        }
        (temp, ExportService::new(repo))
    }

    #[test]
    fn test_export_all_plain_text_chronological() {
        let (temp, service) = setup(&[
            ("2024-01-05", "fifth"),
            ("2024-01-01", "first"),
            ("2024-01-10", "tenth"),
        ]);
        let options = ExportOptions {
            all: true,
            ..Default::default()
        };

        let path = service.execute_on(date("2024-01-10"), &options).unwrap();
        assert_eq!(path, temp.path().join("my-diary-export.txt"));

        let content = fs::read_to_string(path).unwrap();
        let order: Vec<_> = ["2024-01-01", "2024-01-05", "2024-01-10"]
            .iter()
            .map(|d| content.find(d).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_export_selected_dates_as_markdown() {
        let (temp, service) = setup(&[("2024-01-05", "fifth"), ("2024-01-01", "first")]);
        let options = ExportOptions {
            dates: vec!["2024-01-05".to_string()],
            format: Some("md".to_string()),
            name: Some("january".to_string()),
            out_dir: Some(temp.path().join("out")),
            ..Default::default()
        };

        let path = service.execute_on(date("2024-01-10"), &options).unwrap();
        assert_eq!(path, temp.path().join("out").join("january.md"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "# Friday, January 5, 2024\n\nfifth\n\n---\n\n"
        );
    }

    #[test]
    fn test_export_uses_configured_defaults() {
        let (temp, service) = setup(&[("2024-01-05", "fifth")]);
        let mut config = service.repository.load_config().unwrap();
        config.export_format = ExportFormat::Json;
        config.export_name = "backup".to_string();
        service.repository.save_config(&config).unwrap();

        let options = ExportOptions {
            all: true,
            ..Default::default()
        };
        let path = service.execute_on(date("2024-01-10"), &options).unwrap();
        assert_eq!(path, temp.path().join("backup.json"));
    }

    #[test]
    fn test_export_errors() {
        let (_temp, empty) = setup(&[]);
        let all = ExportOptions {
            all: true,
            ..Default::default()
        };
        assert!(matches!(
            empty.execute_on(date("2024-01-10"), &all),
            Err(DiaryError::NothingToExport)
        ));

        let (_temp, service) = setup(&[("2024-01-05", "fifth")]);
        assert!(matches!(
            service.execute_on(date("2024-01-10"), &ExportOptions::default()),
            Err(DiaryError::NothingSelected)
        ));

        let missing = ExportOptions {
            dates: vec!["2024-02-01".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            service.execute_on(date("2024-01-10"), &missing),
            Err(DiaryError::EntryNotFound(_))
        ));

        let bad_format = ExportOptions {
            all: true,
            format: Some("docx".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.execute_on(date("2024-01-10"), &bad_format),
            Err(DiaryError::UnknownFormat(_))
        ));
    }
}
