//! nicediary - personal diary store
//!
//! Date-keyed diary entries kept in a single local record, written through a
//! debounced autosave session and exported as text, markdown, HTML or JSON.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DiaryError;
