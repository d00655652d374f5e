//! Application layer - Use cases and orchestration

pub mod browse;
pub mod export_entries;
pub mod init;
pub mod manage_config;
pub mod session;
pub mod write_entry;

pub use browse::{BrowseService, EntryListing};
pub use export_entries::{ExportOptions, ExportService};
pub use manage_config::ConfigService;
pub use session::DiarySession;
pub use write_entry::{WriteEntryService, WriteOutcome};
