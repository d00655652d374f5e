//! Output formatting utilities

use crate::application::EntryListing;
use crate::domain::entry::{format_long_date, word_count_label};
use crate::domain::{CalendarCell, CalendarMonth, Entry};

/// Format the browse list: one header line and preview per entry
pub fn format_entry_list(listing: &EntryListing) -> String {
    if listing.entries.is_empty() {
        return if listing.total == 0 {
            "No entries yet. Start writing to begin your journey.".to_string()
        } else {
            "No entries match your search.".to_string()
        };
    }

    let mut output = String::new();
    for entry in &listing.entries {
        output.push_str(&format!(
            "{}  {}  ({})\n    {}\n",
            entry.date(),
            format_long_date(entry.date()),
            word_count_label(entry.word_count()),
            entry.preview().replace('\n', " ")
        ));
    }
    output
}

/// Format a single entry in full
pub fn format_entry(entry: &Entry) -> String {
    format!(
        "{}\n{}\n\n{}\n",
        format_long_date(entry.date()),
        word_count_label(entry.word_count()),
        entry.content()
    )
}

/// Render a month grid as text.
///
/// Filler days from neighbouring months are dimmed with parentheses,
/// the selected day is bracketed and today is starred.
pub fn format_calendar(month: &CalendarMonth, cells: &[CalendarCell]) -> String {
    let mut output = format!("{:^34}\n", month.heading());

    for row in cells.chunks(7) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                CalendarCell::Header(name) => format!(" {:<3}", name),
                CalendarCell::OtherMonth(day) => format!("({:>2})", day),
                CalendarCell::Day {
                    date,
                    selected,
                    today,
                } => {
                    let day = date.format("%e").to_string();
                    match (selected, today) {
                        (true, _) => format!("[{}]", day),
                        (false, true) => format!(" {}*", day),
                        (false, false) => format!(" {} ", day),
                    }
                }
            })
            .collect();
        output.push_str(line.join(" ").trim_end());
        output.push('\n');
    }
    output
}
