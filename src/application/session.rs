//! Writing session: active date, editor buffer and autosave

use crate::domain::entry::{count_words, word_count_label};
use crate::domain::selection::ExportOption;
use crate::domain::{
    CalendarCell, CalendarMonth, DebounceTimer, Entry, EntryStore, ExportDialog, ExportFile,
    ExportFormat, Quarantined, RecordStorage,
};
use crate::error::{DiaryError, Result};
use crate::infrastructure::{DiaryRepository, FileSystemRepository};
use chrono::NaiveDate;
use std::time::{Duration, Instant};
use tracing::debug;

/// One editing session over an [`EntryStore`].
///
/// Text input is buffered and written through a debounce timer. Anything that
/// moves away from the active date flushes the buffer first, so edits are
/// never dropped on navigation.
#[derive(Debug)]
pub struct DiarySession<S> {
    store: EntryStore<S>,
    today: NaiveDate,
    active_date: NaiveDate,
    buffer: String,
    autosave: DebounceTimer,
    calendar: CalendarMonth,
    calendar_open: bool,
    export: ExportDialog,
    notice: Option<Quarantined>,
}

impl<S: RecordStorage> DiarySession<S> {
    /// Load entries from `storage` and start editing `today`.
    ///
    /// A corrupt record does not abort the session; it is kept as a notice
    /// (see [`DiarySession::take_notice`]) and the session starts empty.
    pub fn load(storage: S, today: NaiveDate, quiet_period: Duration) -> Result<Self> {
        let (store, notice) = EntryStore::load_or_recover(storage)?;
        let buffer = content_for(&store, today);

        Ok(DiarySession {
            store,
            today,
            active_date: today,
            buffer,
            autosave: DebounceTimer::new(quiet_period),
            calendar: CalendarMonth::containing(today),
            calendar_open: false,
            export: ExportDialog::new(),
            notice,
        })
    }

    /// Problem met while loading, if any. Returned once.
    pub fn take_notice(&mut self) -> Option<Quarantined> {
        self.notice.take()
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn active_date(&self) -> NaiveDate {
        self.active_date
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Words in the buffer, updated on every input without waiting for a save
    pub fn word_count(&self) -> usize {
        count_words(&self.buffer)
    }

    pub fn word_count_label(&self) -> String {
        word_count_label(self.word_count())
    }

    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Replace the buffer with `text` and restart the autosave timer
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.buffer = text.into();
        self.autosave.start(now);
    }

    /// Advance time; saves the buffer if the quiet period has elapsed.
    /// Returns whether a save happened.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.autosave.poll(now) {
            return Ok(false);
        }
        debug!(date = %self.active_date, "autosave fired");
        self.save_buffer()?;
        Ok(true)
    }

    /// Save immediately if there is anything unsaved.
    /// Returns whether a save happened.
    pub fn flush(&mut self) -> Result<bool> {
        let pending = self.autosave.flush_now();
        if !pending && self.buffer == content_for(&self.store, self.active_date) {
            return Ok(false);
        }
        self.save_buffer()?;
        Ok(true)
    }

    /// Flush and hand back the store
    pub fn flush_and_close(mut self) -> Result<EntryStore<S>> {
        self.flush()?;
        Ok(self.store)
    }

    /// Save the buffer for the current date, then switch to `date`
    pub fn set_active_date(&mut self, date: NaiveDate) -> Result<()> {
        self.flush()?;
        self.active_date = date;
        self.buffer = content_for(&self.store, date);
        debug!(%date, "active date changed");
        Ok(())
    }

    /// Delete the entry for `date`; clears the editor when it is the active date
    pub fn remove(&mut self, date: NaiveDate) -> Result<bool> {
        if date == self.active_date {
            self.autosave.cancel();
            self.buffer.clear();
        }
        self.store.remove(date)
    }

    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.store.search(term)
    }

    // Calendar popup

    /// Show the calendar on the month of the active date
    pub fn open_calendar(&mut self) {
        self.calendar = CalendarMonth::containing(self.active_date);
        self.calendar_open = true;
    }

    pub fn close_calendar(&mut self) {
        self.calendar_open = false;
    }

    pub fn is_calendar_open(&self) -> bool {
        self.calendar_open
    }

    pub fn calendar_month(&self) -> CalendarMonth {
        self.calendar
    }

    /// Display `month` without touching the active date
    pub fn show_month(&mut self, month: CalendarMonth) {
        self.calendar = month;
    }

    pub fn prev_month(&mut self) {
        self.calendar = self.calendar.prev();
    }

    pub fn next_month(&mut self) {
        self.calendar = self.calendar.next();
    }

    pub fn calendar_grid(&self) -> Vec<CalendarCell> {
        self.calendar.grid(self.active_date, self.today)
    }

    /// Pick `day` of the displayed month and close the calendar
    pub fn pick_calendar_day(&mut self, day: u32) -> Result<()> {
        let date = self.calendar.day(day).ok_or_else(|| {
            DiaryError::InvalidDate(format!("day {} of {}", day, self.calendar.heading()))
        })?;
        self.set_active_date(date)?;
        self.calendar_open = false;
        Ok(())
    }

    // Export dialog

    pub fn open_export(&mut self) -> Result<()> {
        self.flush()?;
        self.export.open(self.store.entries())
    }

    pub fn export_dialog(&self) -> &ExportDialog {
        &self.export
    }

    pub fn export_options(&self) -> Vec<ExportOption> {
        self.export.options(self.store.entries())
    }

    pub fn toggle_export(&mut self, date: NaiveDate) -> bool {
        self.export.toggle(date)
    }

    pub fn toggle_export_all(&mut self) {
        self.export.toggle_all();
    }

    pub fn cancel_export(&mut self) {
        self.export.cancel();
    }

    pub fn download_export(&mut self, format: ExportFormat, base_name: &str) -> Result<ExportFile> {
        self.export.download(self.store.entries(), format, base_name)
    }

    fn save_buffer(&mut self) -> Result<()> {
        self.store.upsert(self.active_date, &self.buffer)
    }
}

impl DiarySession<FileSystemRepository> {
    /// Open a session on a diary directory, using its configured autosave delay
    pub fn open(repository: &FileSystemRepository, today: NaiveDate) -> Result<Self> {
        let config = repository.load_config()?;
        let mut session = Self::load(repository.clone(), today, config.autosave_delay())?;

        if let Some(notice) = session.take_notice() {
            eprintln!(
                "Warning: {}\nThe unreadable file was kept at {}; starting with no entries.",
                notice.error, notice.location
            );
        }
        Ok(session)
    }
}

fn content_for<S: RecordStorage>(store: &EntryStore<S>, date: NaiveDate) -> String {
    store
        .get(date)
        .map(|e| e.content().to_string())
        .unwrap_or_default()
}
