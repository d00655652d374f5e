//! Export dialog: choosing which entries go into an export

use crate::domain::entry::format_long_date;
use crate::domain::export::{ExportFile, ExportFormat};
use crate::domain::Entry;
use crate::error::{DiaryError, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::info;

/// A row offered in the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOption {
    pub date: NaiveDate,
    pub label: String,
    pub preview: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum DialogState {
    #[default]
    Closed,
    Open {
        offered: Vec<NaiveDate>,
        selected: BTreeSet<NaiveDate>,
    },
}

/// Dialog state machine: closed until opened over a non-empty collection,
/// then toggled until it is cancelled or a file is downloaded.
#[derive(Debug, Clone, Default)]
pub struct ExportDialog {
    state: DialogState,
}

impl ExportDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open over `entries` with nothing selected
    pub fn open(&mut self, entries: &[Entry]) -> Result<()> {
        if entries.is_empty() {
            return Err(DiaryError::NothingToExport);
        }

        let mut offered: Vec<NaiveDate> = entries.iter().map(|e| e.date()).collect();
        offered.sort_by(|a, b| b.cmp(a));
        offered.dedup();

        self.state = DialogState::Open {
            offered,
            selected: BTreeSet::new(),
        };
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    /// Close without producing anything
    pub fn cancel(&mut self) {
        self.state = DialogState::Closed;
    }

    /// Flip one checkbox. Returns the new checked state; dates that are not
    /// offered stay unchecked.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let DialogState::Open { offered, selected } = &mut self.state else {
            return false;
        };
        if !offered.contains(&date) {
            return false;
        }
        if selected.remove(&date) {
            false
        } else {
            selected.insert(date);
            true
        }
    }

    /// Set one checkbox explicitly
    pub fn set_selected(&mut self, date: NaiveDate, checked: bool) -> bool {
        if self.is_selected(date) != checked {
            self.toggle(date);
        }
        self.is_selected(date)
    }

    /// Select everything, or clear the selection when everything is selected
    pub fn toggle_all(&mut self) {
        let all = self.all_selected();
        if let DialogState::Open { offered, selected } = &mut self.state {
            selected.clear();
            if !all {
                selected.extend(offered.iter().copied());
            }
        }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        match &self.state {
            DialogState::Open { selected, .. } => selected.contains(&date),
            DialogState::Closed => false,
        }
    }

    pub fn selected_count(&self) -> usize {
        match &self.state {
            DialogState::Open { selected, .. } => selected.len(),
            DialogState::Closed => 0,
        }
    }

    pub fn all_selected(&self) -> bool {
        match &self.state {
            DialogState::Open { offered, selected } => selected.len() == offered.len(),
            DialogState::Closed => false,
        }
    }

    pub fn can_download(&self) -> bool {
        self.selected_count() > 0
    }

    /// "1 entry selected", "3 entries selected"
    pub fn selected_label(&self) -> String {
        let n = self.selected_count();
        format!("{} {} selected", n, if n == 1 { "entry" } else { "entries" })
    }

    /// Caption of the select-all button
    pub fn select_all_label(&self) -> &'static str {
        if self.all_selected() {
            "Deselect All"
        } else {
            "Select All"
        }
    }

    /// Rows to display, most recent first
    pub fn options(&self, entries: &[Entry]) -> Vec<ExportOption> {
        let DialogState::Open { offered, selected } = &self.state else {
            return Vec::new();
        };

        offered
            .iter()
            .filter_map(|date| entries.iter().find(|e| e.date() == *date))
            .map(|e| ExportOption {
                date: e.date(),
                label: format_long_date(e.date()),
                preview: e.preview(),
                selected: selected.contains(&e.date()),
            })
            .collect()
    }

    /// Render the selected entries and close the dialog
    pub fn download(
        &mut self,
        entries: &[Entry],
        format: ExportFormat,
        base_name: &str,
    ) -> Result<ExportFile> {
        let DialogState::Open { selected, .. } = &self.state else {
            return Err(DiaryError::NothingSelected);
        };
        if selected.is_empty() {
            return Err(DiaryError::NothingSelected);
        }

        let chosen = entries.iter().filter(|e| selected.contains(&e.date()));
        let file = ExportFile::render(chosen, format, base_name)?;
        info!(
            file = %file.file_name,
            entries = selected.len(),
            "export rendered"
        );

        self.state = DialogState::Closed;
        Ok(file)
    }
}
