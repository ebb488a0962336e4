//! Interactive table engine.
//!
//! A [`Table`] owns the records, the column descriptors and an immutable
//! [`TableState`]. Interaction is expressed as [`Action`]s which go through
//! the pure [`reduce`] function; after each change the [`DerivedView`] is
//! recomputed (filter → group → sort → expand → paginate).
//!
//! # Modules
//!
//! - [`column`] - Column descriptors and header groups
//! - [`filter`] - Filter predicates and filter facets
//! - [`group`] - Grouping with aggregation
//! - [`sort`] - Multi-column sorting
//! - [`page`] - Pagination
//! - [`selection`] - Row selection
//! - [`state`] - Interaction state and its reducer
//! - [`view`] - The derived view
//! - [`edit`] - Inline cell editing
//!
//! # Example
//!
//! ```
//! use peoplegrid_lib::make_data;
//! use peoplegrid_lib::table::{Action, Table, TableOptions, demo_columns};
//!
//! let mut table = Table::new(demo_columns(), make_data(&[100]), TableOptions::default()).unwrap();
//! assert_eq!(table.state().page_index, 2);
//!
//! table.dispatch(Action::NextPage).unwrap();
//! assert_eq!(table.state().page_index, 3);
//! assert_eq!(table.page().len(), 10);
//! ```

pub mod column;
pub mod edit;
pub mod filter;
pub mod group;
pub mod options;
pub mod page;
pub mod row;
pub mod selection;
pub mod sort;
pub mod state;
pub mod view;

pub use column::Column;
pub use column::demo_columns;
pub use edit::CellCommit;
pub use edit::CellEditor;
pub use filter::ColumnFilter;
pub use filter::FilterKind;
pub use filter::FilterValue;
pub use options::TableOptions;
pub use row::CellKind;
pub use row::Row;
pub use row::RowId;
pub use selection::SelectionMode;
pub use sort::SortBy;
pub use state::Action;
pub use state::ReduceContext;
pub use state::StateSnapshot;
pub use state::TableState;
pub use state::reduce;
pub use view::DerivedView;

use std::collections::HashSet;

use log::debug;
use log::info;
use log::warn;

use crate::error::Error;
use crate::model::Record;
use crate::model::Value;
use crate::model::record_at;
use crate::model::record_at_mut;

use column::Accessor;
use column::CellRender;
use column::HeaderGroup;
use row::build_rows;
use row::cell_kind;
use row::parse_row_id;
use row::row_id;

/// A cell as the renderer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    /// `true` if the cell accepts edits.
    pub editable: bool,
    /// Record value, group value or aggregated value, depending on `kind`.
    pub value: Value,
}

/// The table engine.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    data: Vec<Record>,
    original: Vec<Record>,
    options: TableOptions,
    state: TableState,
    /// Data rows built from `data`, before filtering.
    core_rows: Vec<Row>,
    /// Ids of every data row in `core_rows`.
    row_ids: Vec<RowId>,
    view: DerivedView,
}

impl Table {
    /// Creates a table over `data`. The data is also kept as the original
    /// for [`Table::reset_data`].
    pub fn new(columns: Vec<Column>, data: Vec<Record>, options: TableOptions) -> Result<Self, Error> {
        options.validate()?;
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(Error::invalid_argument(
                    "columns",
                    format!("duplicate column id '{}'", column.id),
                ));
            }
        }

        let state = TableState::new(&options);
        let core_rows = build_rows(&data, &columns);
        let row_ids = core_rows.iter().flat_map(Row::data_ids).collect();
        let view = DerivedView::compute(&core_rows, &columns, &state);
        info!("Created table with {} columns and {} top-level records", columns.len(), data.len());

        Ok(Self {
            columns,
            original: data.clone(),
            data,
            options,
            state,
            core_rows,
            row_ids,
            view,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by id.
    pub fn column(&self, column_id: &str) -> Result<&Column, Error> {
        self.columns
            .iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| Error::UnknownColumn(column_id.to_string()))
    }

    /// The current records, edits included.
    pub fn data(&self) -> &[Record] {
        &self.data
    }

    /// The record behind the data row `row_id`, at any depth.
    pub fn record(&self, row_id: &str) -> Result<&Record, Error> {
        parse_row_id(row_id)
            .and_then(|path| record_at(&self.data, &path))
            .ok_or_else(|| Error::UnknownRow(row_id.to_string()))
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Columns in display order for the current grouping.
    pub fn visible_columns(&self) -> Vec<&Column> {
        column::visible_columns(&self.columns, &self.state.group_by)
    }

    /// Header rows over [`Table::visible_columns`].
    pub fn header_groups(&self) -> Vec<HeaderGroup> {
        column::header_groups(&self.visible_columns())
    }

    /// Rows of the current page.
    pub fn page(&self) -> Vec<&Row> {
        self.view.page()
    }

    /// Returns `true` if the row is selected. A group row counts as selected
    /// when all of its data rows are.
    pub fn is_selected(&self, row: &Row) -> bool {
        let ids = row.data_ids();
        !ids.is_empty() && ids.iter().all(|id| self.state.selected_rows.contains(id))
    }

    /// Returns `true` if every data row is selected.
    pub fn is_all_selected(&self) -> bool {
        !self.row_ids.is_empty() && self.row_ids.iter().all(|id| self.state.selected_rows.contains(id))
    }

    /// Describes one cell of the derived view.
    pub fn cell(&self, row_id: &str, column_id: &str) -> Result<Cell, Error> {
        let row = self
            .view
            .find(row_id)
            .ok_or_else(|| Error::UnknownRow(row_id.to_string()))?;
        let column = self.column(column_id)?;
        let kind = cell_kind(row, column, &self.state.group_by);
        Ok(Cell {
            kind,
            editable: kind == CellKind::Plain && !row.is_group() && column.cell == CellRender::Editable,
            value: row.value(column_id).clone(),
        })
    }

    /// Returns `true` if the cell accepts edits.
    pub fn is_editable(&self, row_id: &str, column_id: &str) -> bool {
        self.cell(row_id, column_id).is_ok_and(|c| c.editable)
    }

    // =========================================================================
    // State changes
    // =========================================================================

    /// Applies an action and recomputes the view.
    pub fn dispatch(&mut self, action: Action) -> Result<(), Error> {
        debug!("Dispatching {:?}", action);
        let cx = ReduceContext {
            columns: &self.columns,
            view: &self.view,
            row_ids: &self.row_ids,
            options: &self.options,
        };
        let mut next = reduce(&self.state, &action, &cx)?;
        if matches!(action, Action::DataChanged { .. }) {
            self.rebuild_rows();
            self.retain_known_ids(&mut next);
        }
        self.state = next;
        self.refresh();
        Ok(())
    }

    // =========================================================================
    // Data changes
    // =========================================================================

    /// Sets a field of a top-level record. The page is kept.
    pub fn update_my_data(&mut self, row_index: usize, column_id: &str, value: impl Into<Value>) -> Result<(), Error> {
        self.update_at(&[row_index], column_id, value.into())
    }

    /// Sets a field of the data row `row_id`, at any depth. The page is kept.
    pub fn update_cell(&mut self, row_id: &str, column_id: &str, value: impl Into<Value>) -> Result<(), Error> {
        let path = parse_row_id(row_id).ok_or_else(|| Error::UnknownRow(row_id.to_string()))?;
        self.update_at(&path, column_id, value.into())
    }

    /// Applies an edit produced by a [`CellEditor`].
    pub fn commit_edit(&mut self, commit: CellCommit) -> Result<(), Error> {
        self.update_cell(&commit.row_id, &commit.column_id, commit.value)
    }

    /// Replaces all records.
    pub fn replace_data(&mut self, data: Vec<Record>, preserve_view: bool) -> Result<(), Error> {
        info!("Replacing table data with {} top-level records", data.len());
        self.data = data;
        self.dispatch(Action::DataChanged { preserve_view })
    }

    /// Restores the records the table was created with. The page is kept.
    pub fn reset_data(&mut self) -> Result<(), Error> {
        info!("Resetting table data");
        self.data = self.original.clone();
        self.dispatch(Action::DataChanged { preserve_view: true })
    }

    fn update_at(&mut self, path: &[usize], column_id: &str, value: Value) -> Result<(), Error> {
        let column = self.column(column_id)?;
        let field = match (&column.accessor, column.cell) {
            (Accessor::Field(field), CellRender::Editable) => field.clone(),
            _ => {
                return Err(Error::NotEditable {
                    row: row_id(path),
                    column: column_id.to_string(),
                });
            }
        };

        let record = record_at_mut(&mut self.data, path).ok_or_else(|| Error::UnknownRow(row_id(path)))?;
        if let Err(e) = record.set(&field, value) {
            warn!("Rejected edit of {}/{}: {}", row_id(path), e.field(), e);
            return Err(e.into());
        }
        debug!("Updated {}/{}", row_id(path), column_id);
        self.dispatch(Action::DataChanged { preserve_view: true })
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The state block shown under the table.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(&self.state, &self.view)
    }

    /// Options for a select filter: the column's unique values over all data
    /// rows.
    pub fn filter_options(&self, column_id: &str) -> Result<Vec<Value>, Error> {
        self.column(column_id)?;
        Ok(filter::unique_values(&self.core_rows, column_id))
    }

    /// Bounds for a slider or range filter.
    pub fn filter_bounds(&self, column_id: &str) -> Result<Option<(f64, f64)>, Error> {
        self.column(column_id)?;
        Ok(filter::min_max(&self.core_rows, column_id))
    }

    fn rebuild_rows(&mut self) {
        self.core_rows = build_rows(&self.data, &self.columns);
        self.row_ids = self.core_rows.iter().flat_map(Row::data_ids).collect();
    }

    /// Drops selected and expanded data row ids that no longer name a record.
    /// Group ids are derived from values and are kept.
    fn retain_known_ids(&self, state: &mut TableState) {
        let known: HashSet<&str> = self.row_ids.iter().map(String::as_str).collect();
        let before = state.selected_rows.len() + state.expanded.len();
        state.selected_rows.retain(|id| known.contains(id.as_str()));
        state
            .expanded
            .retain(|id| parse_row_id(id).is_none() || known.contains(id.as_str()));
        let dropped = before - state.selected_rows.len() - state.expanded.len();
        if dropped > 0 {
            debug!("Dropped {} stale row ids", dropped);
        }
    }

    fn refresh(&mut self) {
        self.view = DerivedView::compute(&self.core_rows, &self.columns, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::model::Person;
    use crate::model::Status;

    fn person(first_name: &str, age: u32, status: Status) -> Person {
        Person {
            first_name: first_name.into(),
            last_name: "doe".into(),
            age,
            visits: 10,
            progress: 50,
            status,
        }
    }

    fn table() -> Table {
        let data = vec![
            Record::new(person("ann", 20, Status::Single)),
            Record::new(person("bob", 30, Status::Complicated))
                .with_sub_rows(vec![Record::new(person("cid", 5, Status::Single))]),
            Record::new(person("dee", 40, Status::Single)),
        ];
        Table::new(demo_columns(), data, TableOptions::new().with_initial_page_index(0)).unwrap()
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let mut columns = demo_columns();
        columns.push(Column::accessor("age", "Age again"));
        assert!(Table::new(columns, Vec::new(), TableOptions::new()).is_err());
    }

    #[test]
    fn test_update_my_data_coerces_and_keeps_page() {
        let mut table = table();
        table.update_my_data(0, "age", "21").unwrap();
        assert_eq!(table.data()[0].person.age, 21);
        assert_eq!(table.cell("0", "age").unwrap().value, Value::Int(21));

        let err = table.update_my_data(0, "age", "old").unwrap_err();
        assert!(matches!(&err, Error::Field(e @ FieldError::Parse { .. }) if e.field() == "age"));
        assert_eq!(table.data()[0].person.age, 21);
    }

    #[test]
    fn test_update_nested_cell() {
        let mut table = table();
        table.update_cell("1.0", "status", "relationship").unwrap();
        assert_eq!(
            table.data()[1].sub_rows.as_ref().unwrap()[0].person.status,
            Status::Relationship
        );
        assert!(matches!(
            table.update_cell("9", "age", "1"),
            Err(Error::UnknownRow(_))
        ));
        assert!(matches!(
            table.update_cell("0", "selection", "1"),
            Err(Error::NotEditable { .. })
        ));
    }

    #[test]
    fn test_group_cells() {
        let mut table = table();
        table
            .dispatch(Action::ToggleGroupBy {
                column_id: "status".into(),
                grouped: None,
            })
            .unwrap();
        let ids: Vec<_> = table.visible_columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids[..2], ["selection", "status"]);

        let group = table.cell("status:single", "status").unwrap();
        assert_eq!(group.kind, CellKind::Grouped);
        let age = table.cell("status:single", "age").unwrap();
        assert_eq!(age.kind, CellKind::Aggregated);
        assert!(!age.editable);
        assert_eq!(table.cell("0", "status").unwrap().kind, CellKind::RepeatedValue);
    }

    #[test]
    fn test_group_selection() {
        let mut table = table();
        table
            .dispatch(Action::ToggleGroupBy {
                column_id: "status".into(),
                grouped: Some(true),
            })
            .unwrap();
        table
            .dispatch(Action::ToggleRowSelected {
                row_id: "status:complicated".into(),
                selected: None,
            })
            .unwrap();
        let selected: Vec<_> = table.state().selected_rows.iter().cloned().collect();
        assert_eq!(selected, vec!["1".to_string(), "1.0".to_string()]);
        let group = table.view().find("status:complicated").unwrap();
        assert!(table.is_selected(group));
        assert!(!table.is_all_selected());
    }

    #[test]
    fn test_filter_facets() {
        let table = table();
        assert_eq!(table.filter_bounds("age").unwrap(), Some((5.0, 40.0)));
        let statuses = table.filter_options("status").unwrap();
        assert_eq!(statuses, vec![Value::from("single"), Value::from("complicated")]);
        assert!(table.filter_options("nope").is_err());
    }
}
