//! Month grid for picking a date

use chrono::{Datelike, Months, NaiveDate};

/// Column headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One cell of the rendered month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    /// Weekday column header
    Header(&'static str),
    /// Filler day from the previous or next month (not selectable)
    OtherMonth(u32),
    /// Day of the displayed month
    Day {
        date: NaiveDate,
        selected: bool,
        today: bool,
    },
}

/// The month a calendar is currently displaying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first_day: NaiveDate,
}

impl CalendarMonth {
    /// Month `month` (1-12) of `year`, `None` if out of range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| CalendarMonth { first_day })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        CalendarMonth {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Parse a `YYYY-MM` reference
    pub fn parse(input: &str) -> Option<Self> {
        let (year, month) = input.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Previous month; stays put at the earliest representable month
    pub fn prev(self) -> Self {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| CalendarMonth { first_day })
            .unwrap_or(self)
    }

    /// Next month; stays put at the latest representable month
    pub fn next(self) -> Self {
        self.first_day
            .checked_add_months(Months::new(1))
            .map(|first_day| CalendarMonth { first_day })
            .unwrap_or(self)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            2 if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Date of day `day` in this month
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first_day.with_day(day)
    }

    /// Heading such as "January 2024"
    pub fn heading(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    /// Build the grid: weekday headers, tail of the previous month, every day
    /// of this month, then the start of the next month up to a full week.
    pub fn grid(&self, active: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
        let leading = self.first_day.weekday().num_days_from_sunday();
        let days = self.days_in_month();
        let days_in_prev = self.prev().days_in_month();
        let used = leading + days;
        let trailing = (7 - used % 7) % 7;

        let mut cells = Vec::with_capacity((7 + used + trailing) as usize);
        cells.extend(WEEKDAY_HEADERS.map(CalendarCell::Header));
        cells.extend((0..leading).rev().map(|i| CalendarCell::OtherMonth(days_in_prev - i)));
        cells.extend((1..=days).filter_map(|d| self.day(d)).map(|date| CalendarCell::Day {
            date,
            selected: date == active,
            today: date == today,
        }));
        cells.extend((1..=trailing).map(CalendarCell::OtherMonth));
        cells
    }
}
