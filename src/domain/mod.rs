//! Domain layer - Diary model and pure logic

pub mod autosave;
pub mod calendar;
pub mod date_ref;
pub mod entry;
pub mod export;
pub mod selection;
pub mod store;

pub use autosave::DebounceTimer;
pub use calendar::{CalendarCell, CalendarMonth};
pub use date_ref::{resolve_date, DateReference};
pub use entry::Entry;
pub use export::{ExportFile, ExportFormat};
pub use selection::ExportDialog;
pub use store::{EntryStore, Quarantined, RecordStorage, RECORD_KEY};
