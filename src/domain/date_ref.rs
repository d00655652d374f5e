//! Human date references: "today", "last friday", "2024-01-05"

use crate::error::{DiaryError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Which occurrence of a weekday is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// Today if it matches, otherwise the most recent one
    Latest,
    /// Strictly before today
    Last,
    /// Strictly after today
    Next,
}

/// A date as typed by the user, resolved against a base date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateReference {
    /// Days relative to the base date (today = 0, yesterday = -1)
    Offset(i64),
    Weekday(Weekday, Occurrence),
    Exact(NaiveDate),
}

impl DateReference {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();
        let invalid = || DiaryError::InvalidDate(input.to_string());

        let reference = match normalized.as_str() {
            "today" | "now" => DateReference::Offset(0),
            "yesterday" => DateReference::Offset(-1),
            "tomorrow" => DateReference::Offset(1),
            _ => {
                if let Some(day) = normalized.strip_prefix("last ") {
                    DateReference::Weekday(parse_weekday(day).ok_or_else(invalid)?, Occurrence::Last)
                } else if let Some(day) = normalized.strip_prefix("next ") {
                    DateReference::Weekday(parse_weekday(day).ok_or_else(invalid)?, Occurrence::Next)
                } else if let Some(day) = parse_weekday(&normalized) {
                    DateReference::Weekday(day, Occurrence::Latest)
                } else {
                    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                        .map(DateReference::Exact)
                        .map_err(|_| invalid())?
                }
            }
        };

        Ok(reference)
    }

    pub fn resolve(&self, base: NaiveDate) -> NaiveDate {
        match *self {
            DateReference::Offset(days) => base + Duration::days(days),
            DateReference::Exact(date) => date,
            DateReference::Weekday(target, occurrence) => {
                let current = base.weekday().num_days_from_sunday() as i64;
                let target = target.num_days_from_sunday() as i64;
                let back = (current - target).rem_euclid(7);
                let ahead = (target - current).rem_euclid(7);

                match occurrence {
                    Occurrence::Latest => base - Duration::days(back),
                    Occurrence::Last => base - Duration::days(if back == 0 { 7 } else { back }),
                    Occurrence::Next => base + Duration::days(if ahead == 0 { 7 } else { ahead }),
                }
            }
        }
    }
}

/// Parse a reference and resolve it against `base` in one go
pub fn resolve_date(input: &str, base: NaiveDate) -> Result<NaiveDate> {
    Ok(DateReference::parse(input)?.resolve(base))
}

// Full weekday names only; chrono would also take "mon", "tue", ...
fn parse_weekday(name: &str) -> Option<Weekday> {
    if !name.ends_with("day") {
        return None;
    }
    name.parse().ok()
}
