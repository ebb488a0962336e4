//! The derived view: what the table currently displays.
//!
//! The pipeline runs filter → group → sort → expand → paginate over the
//! data rows, in that order.

use std::collections::BTreeSet;

use log::debug;

use super::column::Column;
use super::filter::FilterKind;
use super::filter::filter_rows;
use super::group::group_rows;
use super::page::Pagination;
use super::row::Row;
use super::row::RowId;
use super::sort::sort_rows;
use super::state::TableState;

/// Rows after filtering, grouping and sorting, plus the flattened expanded
/// list and the current page over it.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    rows: Vec<Row>,
    /// Tree positions of the visible rows, in display order.
    expanded: Vec<Vec<usize>>,
    pagination: Pagination,
}

impl DerivedView {
    /// Runs the pipeline over `core_rows` for the given state.
    pub fn compute(core_rows: &[Row], columns: &[Column], state: &TableState) -> Self {
        let filters: Vec<(FilterKind, &_)> = state
            .filters
            .iter()
            .filter_map(|f| {
                columns
                    .iter()
                    .find(|c| c.id == f.id)
                    .map(|c| (c.filter, f))
            })
            .collect();

        let filtered = filter_rows(core_rows.to_vec(), &filters);
        let mut rows = group_rows(filtered, &state.group_by, columns);
        sort_rows(&mut rows, &state.sort_by);

        let mut expanded = Vec::new();
        flatten(&rows, &state.expanded, &mut Vec::new(), &mut expanded);
        let pagination = Pagination::new(expanded.len(), state.page_index, state.page_size);

        debug!(
            "View: {} top-level rows, {} visible, page {}/{}",
            rows.len(),
            expanded.len(),
            state.page_index.saturating_add(1),
            pagination.page_count()
        );

        Self {
            rows,
            expanded,
            pagination,
        }
    }

    /// Top-level rows after filtering, grouping and sorting.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All visible rows in display order, expanded children included.
    pub fn expanded_rows(&self) -> impl Iterator<Item = &Row> {
        self.expanded.iter().filter_map(|pos| self.row_at(pos))
    }

    /// Number of visible rows.
    pub fn expanded_len(&self) -> usize {
        self.expanded.len()
    }

    /// Rows of the current page.
    pub fn page(&self) -> Vec<&Row> {
        self.expanded[self.pagination.range()]
            .iter()
            .filter_map(|pos| self.row_at(pos))
            .collect()
    }

    /// Paging information.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next_page()
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous_page()
    }

    /// Finds a row anywhere in the tree, collapsed or not.
    pub fn find(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find_map(|row| row.find(id))
    }

    fn row_at(&self, pos: &[usize]) -> Option<&Row> {
        let (first, rest) = pos.split_first()?;
        rest.iter()
            .try_fold(self.rows.get(*first)?, |row, &i| row.sub_rows.get(i))
    }
}

fn flatten(rows: &[Row], expanded: &BTreeSet<RowId>, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for (i, row) in rows.iter().enumerate() {
        prefix.push(i);
        out.push(prefix.clone());
        if row.can_expand() && expanded.contains(&row.id) {
            flatten(&row.sub_rows, expanded, prefix, out);
        }
        prefix.pop();
    }
}
