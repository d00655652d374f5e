//! Browse use cases: list, show and delete entries

use crate::application::DiarySession;
use crate::domain::{resolve_date, Entry};
use crate::error::{DiaryError, Result};
use crate::infrastructure::FileSystemRepository;
use chrono::{Local, NaiveDate};

/// Entries matching a search, plus the size of the whole collection
#[derive(Debug, Clone)]
pub struct EntryListing {
    pub entries: Vec<Entry>,
    pub total: usize,
}

/// Service for reading and deleting entries
pub struct BrowseService {
    repository: FileSystemRepository,
    today: NaiveDate,
}

impl BrowseService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self::with_today(repository, Local::now().date_naive())
    }

    /// Service resolving relative dates against `today`
    pub fn with_today(repository: FileSystemRepository, today: NaiveDate) -> Self {
        BrowseService { repository, today }
    }

    /// Entries containing `term` (case-insensitive), most recent first
    pub fn list(&self, term: Option<&str>) -> Result<EntryListing> {
        let session = DiarySession::open(&self.repository, self.today)?;
        let entries = session.search(term.unwrap_or_default()).cloned().collect();

        Ok(EntryListing {
            entries,
            total: session.store().len(),
        })
    }

    pub fn show(&self, date_ref: &str) -> Result<Entry> {
        let date = resolve_date(date_ref, self.today)?;
        let session = DiarySession::open(&self.repository, self.today)?;

        session
            .store()
            .get(date)
            .cloned()
            .ok_or_else(|| DiaryError::EntryNotFound(date.to_string()))
    }

    /// Delete the entry for `date_ref`, failing if there is none
    pub fn delete(&self, date_ref: &str) -> Result<NaiveDate> {
        let date = resolve_date(date_ref, self.today)?;
        let mut session = DiarySession::open(&self.repository, self.today)?;

        if !session.remove(date)? {
            return Err(DiaryError::EntryNotFound(date.to_string()));
        }
        Ok(date)
    }
}
