//! Diary entry model and date presentation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single diary record, keyed by its calendar date.
///
/// The word count is written out with the entry but always recomputed from
/// the content when read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEntry")]
pub struct Entry {
    date: NaiveDate,
    content: String,
    word_count: usize,
}

// Stored shape; `word_count`/`wordCount` are ignored on read
#[derive(Deserialize)]
struct StoredEntry {
    date: NaiveDate,
    content: String,
}

impl From<StoredEntry> for Entry {
    fn from(stored: StoredEntry) -> Self {
        Entry::new(stored.date, stored.content)
    }
}

impl Entry {
    /// Create an entry, deriving the word count from `content`
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        let content = content.into();
        let word_count = count_words(&content);
        Entry {
            date,
            content,
            word_count,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// First 60 characters of the content, with `...` appended when cut
    pub fn preview(&self) -> String {
        const PREVIEW_CHARS: usize = 60;

        let mut preview: String = self.content.chars().take(PREVIEW_CHARS).collect();
        if self.content.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }
}

/// Number of whitespace-separated tokens in `content`
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// "1 word", "0 words", "12 words"
pub fn word_count_label(words: usize) -> String {
    format!("{} {}", words, if words == 1 { "word" } else { "words" })
}

/// Long form used in lists and exports, e.g. "Friday, January 5, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Short form shown for the active date, e.g. "January 5, 2024"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_word_count_derived_from_content() {
        let entry = Entry::new(date(2024, 1, 5), "  went  for a\nwalk\t today ");
        assert_eq!(entry.word_count(), 5);
        assert_eq!(entry.content(), "  went  for a\nwalk\t today ");
    }

    #[test]
    fn test_count_words_blank() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \n\t "), 0);
    }

    #[test]
    fn test_word_count_label_pluralization() {
        assert_eq!(word_count_label(0), "0 words");
        assert_eq!(word_count_label(1), "1 word");
        assert_eq!(word_count_label(42), "42 words");
    }

    #[test]
    fn test_long_and_short_dates() {
        assert_eq!(format_long_date(date(2024, 1, 5)), "Friday, January 5, 2024");
        assert_eq!(format_short_date(date(2024, 11, 23)), "November 23, 2024");
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "a".repeat(75);
        let entry = Entry::new(date(2024, 1, 1), long);
        assert_eq!(entry.preview(), format!("{}...", "a".repeat(60)));

        let short = Entry::new(date(2024, 1, 1), "short note");
        assert_eq!(short.preview(), "short note");
    }

    #[test]
    fn test_serialized_shape() {
        let entry = Entry::new(date(2024, 1, 5), "hello world");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-01-05","content":"hello world","word_count":2}"#
        );
    }

    #[test]
    fn test_accepts_camel_case_word_count() {
        let entry: Entry =
            serde_json::from_str(r#"{"date":"2024-01-05","content":"hi","wordCount":1}"#).unwrap();
        assert_eq!(entry.word_count(), 1);
        assert_eq!(entry.date(), date(2024, 1, 5));
    }

    #[test]
    fn test_stale_word_count_is_recomputed() {
        let entry: Entry =
            serde_json::from_str(r#"{"date":"2024-01-05","content":"a b c","word_count":99}"#)
                .unwrap();
        assert_eq!(entry.word_count(), 3);
    }

    #[test]
    fn test_missing_word_count_still_loads() {
        let entry: Entry =
            serde_json::from_str(r#"{"date":"2024-01-05","content":"a b c"}"#).unwrap();
        assert_eq!(entry, Entry::new(date(2024, 1, 5), "a b c"));
    }
}
