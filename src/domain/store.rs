//! Entry store: the date-keyed collection and its durable record

use crate::domain::Entry;
use crate::error::{DiaryError, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Key of the single durable record holding every entry
pub const RECORD_KEY: &str = "diaryEntries";

/// Key/value storage that holds whole serialized records
pub trait RecordStorage {
    /// Read a record, `None` if it was never written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a record
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Set aside a record that could not be parsed so it is not overwritten.
    /// Earlier quarantined copies are kept. Returns where this copy went.
    fn quarantine(&self, key: &str, value: &str) -> Result<String>;
}

/// An unreadable record that was set aside during loading
#[derive(Debug)]
pub struct Quarantined {
    /// Why the record could not be read
    pub error: DiaryError,
    /// Where the raw record was kept
    pub location: String,
}

/// Ordered, date-unique collection of entries mirrored to a [`RecordStorage`].
///
/// The collection is kept sorted by date, most recent first, and the full
/// collection is written back after every mutation.
#[derive(Debug)]
pub struct EntryStore<S> {
    storage: S,
    entries: Vec<Entry>,
}

impl<S: RecordStorage> EntryStore<S> {
    /// Load the collection, failing with [`DiaryError::CorruptRecord`] if the
    /// record exists but cannot be parsed
    pub fn load(storage: S) -> Result<Self> {
        let entries = match storage.read(RECORD_KEY)? {
            Some(raw) => parse_record(&raw)?,
            None => Vec::new(),
        };
        Ok(Self::from_parts(storage, entries))
    }

    /// Load the collection, recovering from a corrupt record.
    ///
    /// The unreadable record is quarantined and the store starts empty; the
    /// returned [`Quarantined`] describes what happened so the caller can
    /// show it.
    pub fn load_or_recover(storage: S) -> Result<(Self, Option<Quarantined>)> {
        let Some(raw) = storage.read(RECORD_KEY)? else {
            return Ok((Self::from_parts(storage, Vec::new()), None));
        };

        match parse_record(&raw) {
            Ok(entries) => Ok((Self::from_parts(storage, entries), None)),
            Err(err) => {
                let location = storage.quarantine(RECORD_KEY, &raw)?;
                warn!(error = %err, %location, "quarantined unreadable entry record");
                let notice = Quarantined {
                    error: err,
                    location,
                };
                Ok((Self::from_parts(storage, Vec::new()), Some(notice)))
            }
        }
    }

    fn from_parts(storage: S, mut entries: Vec<Entry>) -> Self {
        sort_newest_first(&mut entries);
        // First row in the record wins; later rows for the same date are dropped
        entries.dedup_by(|later, kept| {
            let duplicate = later.date() == kept.date();
            if duplicate {
                warn!(date = %later.date(), "dropping duplicate entry from record");
            }
            duplicate
        });
        debug!(count = entries.len(), "loaded entries");
        EntryStore { storage, entries }
    }

    /// Save `content` for `date`, replacing any previous entry.
    ///
    /// Blank content removes the entry instead of storing it.
    pub fn upsert(&mut self, date: NaiveDate, content: &str) -> Result<()> {
        self.entries.retain(|e| e.date() != date);

        if content.trim().is_empty() {
            debug!(%date, "blank content, entry removed");
        } else {
            let entry = Entry::new(date, content);
            debug!(%date, words = entry.word_count(), "entry saved");
            self.entries.push(entry);
            sort_newest_first(&mut self.entries);
        }

        self.persist()
    }

    /// Delete the entry for `date`, returning whether one existed
    pub fn remove(&mut self, date: NaiveDate) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.date() != date);
        let removed = self.entries.len() != before;
        debug!(%date, removed, "entry removal");

        self.persist()?;
        Ok(removed)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.iter().find(|e| e.date() == date)
    }

    /// Entries whose content contains `term`, ignoring case.
    /// An empty term matches everything.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Entry> + 'a {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(move |e| e.content().to_lowercase().contains(&needle))
    }

    /// All entries, most recent first
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage back, dropping the in-memory collection
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.entries)?;
        self.storage.write(RECORD_KEY, &raw)
    }
}

fn parse_record(raw: &str) -> Result<Vec<Entry>> {
    serde_json::from_str(raw).map_err(|e| DiaryError::CorruptRecord(e.to_string()))
}

fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.date().cmp(&a.date()));
}
