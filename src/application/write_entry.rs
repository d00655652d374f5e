//! Write entry use case

use crate::application::DiarySession;
use crate::domain::resolve_date;
use crate::error::Result;
use crate::infrastructure::{DiaryRepository, EditorSession, FileSystemRepository};
use chrono::{Local, NaiveDate};
use std::time::Instant;

/// What happened to the entry after writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub date: NaiveDate,
    pub word_count: usize,
    /// False when the text was blank and the entry was removed instead
    pub stored: bool,
}

/// Service for writing the entry of a given date
pub struct WriteEntryService {
    repository: FileSystemRepository,
}

impl WriteEntryService {
    pub fn new(repository: FileSystemRepository) -> Self {
        WriteEntryService { repository }
    }

    /// Replace the entry for `date_ref` with `text`, or with whatever the user
    /// writes in their editor when no text is given.
    pub fn execute(&self, date_ref: &str, text: Option<String>) -> Result<WriteOutcome> {
        self.execute_on(Local::now().date_naive(), date_ref, text)
    }

    pub fn execute_on(
        &self,
        today: NaiveDate,
        date_ref: &str,
        text: Option<String>,
    ) -> Result<WriteOutcome> {
        let date = resolve_date(date_ref, today)?;
        let mut session = DiarySession::open(&self.repository, today)?;
        session.set_active_date(date)?;

        let text = match text {
            Some(text) => text,
            None => {
                let editor = EditorSession::new(self.repository.load_config()?.get_editor());
                let scratch = self.repository.scratch_path(&format!("editing-{}.txt", date));
                editor.edit_text(&scratch, session.buffer())?
            }
        };

        session.input(text, Instant::now());
        let word_count = session.word_count();
        let store = session.flush_and_close()?;

        Ok(WriteOutcome {
            date,
            word_count,
            stored: store.get(date).is_some(),
        })
    }
}
