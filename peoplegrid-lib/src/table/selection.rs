//! Row selection.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use super::row::RowId;

/// Selection mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// One row at a time (radio-button style).
    Single,
    /// Any number of rows (checkbox style).
    #[default]
    Multi,
}

/// Tracks selected data rows by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub mode: SelectionMode,
    pub selected: BTreeSet<RowId>,
}

impl Selection {
    /// Wraps an existing set of ids.
    pub fn new(mode: SelectionMode, selected: BTreeSet<RowId>) -> Self {
        Self { mode, selected }
    }

    /// Returns `true` if every id is selected. An empty list is never selected.
    pub fn is_all_selected(&self, ids: &[RowId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// Selects or deselects `ids` together. `None` flips the current state of
    /// the whole set. Returns true if the selection changed.
    pub fn toggle(&mut self, ids: &[RowId], value: Option<bool>) -> bool {
        let select = value.unwrap_or_else(|| !self.is_all_selected(ids));
        let before = self.selected.clone();
        match (self.mode, select) {
            (SelectionMode::None, _) => return false,
            (_, false) => {
                for id in ids {
                    self.selected.remove(id);
                }
            }
            (SelectionMode::Single, true) => {
                self.selected.clear();
                self.selected.extend(ids.iter().take(1).cloned());
            }
            (SelectionMode::Multi, true) => {
                self.selected.extend(ids.iter().cloned());
            }
        }
        before != self.selected
    }

    /// Clears all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Consumes the selection and returns the ids.
    pub fn into_ids(self) -> BTreeSet<RowId> {
        self.selected
    }
}
