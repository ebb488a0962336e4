//! Interaction state and its reducer.
//!
//! [`TableState`] is an immutable value. User interaction is expressed as an
//! [`Action`]; [`reduce`] maps the current state and an action to the next
//! state without touching anything else.

use std::collections::BTreeSet;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use super::column::Column;
use super::filter::ColumnFilter;
use super::filter::FilterValue;
use super::options::TableOptions;
use super::row::RowId;
use super::selection::Selection;
use super::sort::SortBy;
use super::view::DerivedView;
use crate::error::Error;

/// Page, sort, filter, grouping, expansion and selection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub page_index: usize,
    pub page_size: usize,
    pub sort_by: Vec<SortBy>,
    pub filters: Vec<ColumnFilter>,
    pub group_by: Vec<String>,
    pub expanded: BTreeSet<RowId>,
    pub selected_rows: BTreeSet<RowId>,
}

impl TableState {
    /// Initial state for the given options.
    pub fn new(options: &TableOptions) -> Self {
        Self {
            page_index: options.initial_page_index,
            page_size: options.page_size,
            sort_by: Vec::new(),
            filters: Vec::new(),
            group_by: Vec::new(),
            expanded: BTreeSet::new(),
            selected_rows: BTreeSet::new(),
        }
    }

    /// Returns the active filter value of a column.
    pub fn filter_value(&self, column_id: &str) -> Option<&FilterValue> {
        self.filters
            .iter()
            .find(|f| f.id == column_id)
            .map(|f| &f.value)
    }

    /// Returns the sort key of a column.
    pub fn sort_of(&self, column_id: &str) -> Option<&SortBy> {
        self.sort_by.iter().find(|s| s.id == column_id)
    }

    /// Returns `true` if the table is grouped by the column.
    pub fn is_grouped(&self, column_id: &str) -> bool {
        self.group_by.iter().any(|g| g == column_id)
    }
}

/// A user interaction or application event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Jump to a page. Out-of-range indexes are ignored.
    GotoPage(usize),
    NextPage,
    PreviousPage,
    /// Change the page size, keeping the current top row on screen.
    SetPageSize(usize),
    /// Sort by a column. Without `desc` the column cycles
    /// ascending → descending → unsorted. `multi` keeps other sort keys.
    ToggleSortBy {
        column_id: String,
        desc: Option<bool>,
        multi: bool,
    },
    /// Set or clear (with `None` or an empty value) one column's filter.
    SetFilter {
        column_id: String,
        value: Option<FilterValue>,
    },
    /// Replace every filter.
    SetAllFilters(Vec<ColumnFilter>),
    /// Add or remove a column from the grouping. `None` flips it.
    ToggleGroupBy {
        column_id: String,
        grouped: Option<bool>,
    },
    /// Expand or collapse a row. `None` flips it.
    ToggleExpanded {
        row_id: RowId,
        expanded: Option<bool>,
    },
    /// Select or deselect a row with all its data descendants.
    ToggleRowSelected {
        row_id: RowId,
        selected: Option<bool>,
    },
    /// Select or deselect every data row.
    ToggleAllRowsSelected { selected: Option<bool> },
    /// The table data changed. Unless `preserve_view` is set the page index
    /// goes back to the first page.
    DataChanged { preserve_view: bool },
    /// Back to the initial state.
    ResetState,
}

/// What the reducer may consult besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub columns: &'a [Column],
    pub view: &'a DerivedView,
    /// Ids of every data row, before filtering.
    pub row_ids: &'a [RowId],
    pub options: &'a TableOptions,
}

impl ReduceContext<'_> {
    fn column(&self, column_id: &str) -> Result<&Column, Error> {
        self.columns
            .iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| Error::UnknownColumn(column_id.to_string()))
    }
}

/// Computes the state that follows `action`.
pub fn reduce(state: &TableState, action: &Action, cx: &ReduceContext<'_>) -> Result<TableState, Error> {
    let mut next = state.clone();
    match action {
        Action::GotoPage(page_index) => {
            if cx.view.pagination().contains(*page_index) {
                next.page_index = *page_index;
            } else {
                debug!("Ignoring page {} of {}", page_index, cx.view.page_count());
            }
        }
        Action::NextPage => {
            if cx.view.can_next_page() {
                next.page_index += 1;
            }
        }
        Action::PreviousPage => {
            if cx.view.can_previous_page() {
                next.page_index -= 1;
            }
        }
        Action::SetPageSize(page_size) => {
            if *page_size == 0 {
                return Err(Error::invalid_argument("page_size", "must be at least 1"));
            }
            let top_row = state.page_size.saturating_mul(state.page_index);
            next.page_size = *page_size;
            next.page_index = top_row / page_size;
        }
        Action::ToggleSortBy {
            column_id,
            desc,
            multi,
        } => {
            let column = cx.column(column_id)?;
            if !column.can_sort {
                return Err(Error::invalid_argument("column_id", format!("'{}' cannot be sorted", column_id)));
            }
            next.sort_by = toggle_sort(&state.sort_by, column_id, *desc, *multi);
            next.page_index = 0;
        }
        Action::SetFilter { column_id, value } => {
            let column = cx.column(column_id)?;
            if !column.can_filter {
                return Err(Error::invalid_argument("column_id", format!("'{}' cannot be filtered", column_id)));
            }
            match value.as_ref().filter(|v| !v.is_empty()) {
                Some(value) => match next.filters.iter_mut().find(|f| f.id == *column_id) {
                    Some(existing) => existing.value = value.clone(),
                    None => next.filters.push(ColumnFilter::new(column_id.clone(), value.clone())),
                },
                None => next.filters.retain(|f| f.id != *column_id),
            }
            next.page_index = 0;
        }
        Action::SetAllFilters(filters) => {
            for filter in filters {
                cx.column(&filter.id)?;
            }
            next.filters = filters.iter().filter(|f| !f.value.is_empty()).cloned().collect();
            next.page_index = 0;
        }
        Action::ToggleGroupBy { column_id, grouped } => {
            let column = cx.column(column_id)?;
            if !column.can_group_by {
                return Err(Error::invalid_argument("column_id", format!("'{}' cannot be grouped", column_id)));
            }
            let is_grouped = state.is_grouped(column_id);
            match (grouped.unwrap_or(!is_grouped), is_grouped) {
                (true, false) => next.group_by.push(column_id.clone()),
                (false, true) => next.group_by.retain(|g| g != column_id),
                _ => {}
            }
            next.page_index = 0;
        }
        Action::ToggleExpanded { row_id, expanded } => {
            if cx.view.find(row_id).is_none() {
                return Err(Error::UnknownRow(row_id.clone()));
            }
            let is_expanded = state.expanded.contains(row_id);
            if expanded.unwrap_or(!is_expanded) {
                next.expanded.insert(row_id.clone());
            } else {
                next.expanded.remove(row_id);
            }
        }
        Action::ToggleRowSelected { row_id, selected } => {
            let row = cx
                .view
                .find(row_id)
                .ok_or_else(|| Error::UnknownRow(row_id.clone()))?;
            let mut selection = Selection::new(cx.options.selection_mode, next.selected_rows);
            selection.toggle(&row.data_ids(), *selected);
            next.selected_rows = selection.into_ids();
        }
        Action::ToggleAllRowsSelected { selected } => {
            let mut selection = Selection::new(cx.options.selection_mode, next.selected_rows);
            if selected.unwrap_or_else(|| !selection.is_all_selected(cx.row_ids)) {
                selection.toggle(cx.row_ids, Some(true));
            } else {
                selection.clear();
            }
            next.selected_rows = selection.into_ids();
        }
        Action::DataChanged { preserve_view } => {
            if !preserve_view {
                next.page_index = 0;
                next.selected_rows.clear();
                next.expanded.clear();
            }
        }
        Action::ResetState => next = TableState::new(cx.options),
    }
    Ok(next)
}

fn toggle_sort(sort_by: &[SortBy], column_id: &str, desc: Option<bool>, multi: bool) -> Vec<SortBy> {
    let existing = sort_by.iter().find(|s| s.id == column_id);
    let mut next: Vec<SortBy> = if multi {
        sort_by.to_vec()
    } else {
        existing.cloned().into_iter().collect()
    };

    // With several keys, a plain click replaces them with a fresh ascending key.
    let existing = if !multi && sort_by.len() > 1 { None } else { existing };
    let replacement = match (existing, desc) {
        (_, Some(desc)) => Some(SortBy {
            id: column_id.to_string(),
            desc,
        }),
        (None, None) => Some(SortBy::asc(column_id)),
        (Some(s), None) if !s.desc => Some(SortBy::desc(column_id)),
        (Some(_), None) => None,
    };

    match (next.iter().position(|s| s.id == column_id), replacement) {
        (Some(i), Some(key)) => next[i] = key,
        (Some(i), None) => {
            next.remove(i);
        }
        (None, Some(key)) => next.push(key),
        (None, None) => {}
    }
    next
}

/// The state as shown in the debug panel below the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub can_next_page: bool,
    pub can_previous_page: bool,
    pub group_by: Vec<String>,
    pub expanded: Vec<RowId>,
    pub filters: Vec<ColumnFilter>,
    pub selected_rows: Vec<RowId>,
}

impl StateSnapshot {
    pub fn new(state: &TableState, view: &DerivedView) -> Self {
        Self {
            page_index: state.page_index,
            page_size: state.page_size,
            page_count: view.page_count(),
            can_next_page: view.can_next_page(),
            can_previous_page: view.can_previous_page(),
            group_by: state.group_by.clone(),
            expanded: state.expanded.iter().cloned().collect(),
            filters: state.filters.clone(),
            selected_rows: state.selected_rows.iter().cloned().collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
