//! Rows of the derived view.

use std::collections::HashMap;

use crate::model::Record;
use crate::model::Value;

use super::column::Column;

/// Row identifier.
///
/// Data rows use their index path joined by dots (`"3"`, `"3.1"`). Group
/// rows use `column:value`, nested groups joined by `>`
/// (`"status:single>age:20"`).
pub type RowId = String;

/// What a row stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// A record, located by its index path in the table data.
    Data { path: Vec<usize> },
    /// A group of rows sharing `value` in column `column_id`.
    Group { column_id: String, value: Value },
}

/// How a cell of a row is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// The grouping cell of a group row (shows the expander).
    Grouped,
    /// An aggregated summary on a group row.
    Aggregated,
    /// A grouped column on a row grouped by another column. Rendered empty.
    RepeatedValue,
    /// A regular cell.
    Plain,
}

/// A node of the derived view.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    /// Position within the parent list at build or grouping time.
    pub index: usize,
    pub depth: usize,
    pub values: HashMap<String, Value>,
    pub sub_rows: Vec<Row>,
    pub kind: RowKind,
}

static NULL: Value = Value::Null;

impl Row {
    /// Creates a top-level data row.
    pub fn data(index: usize, values: HashMap<String, Value>) -> Self {
        Self {
            id: index.to_string(),
            index,
            depth: 0,
            values,
            sub_rows: Vec::new(),
            kind: RowKind::Data { path: vec![index] },
        }
    }

    /// Returns the value of a column, `Null` when the row has none.
    pub fn value(&self, column_id: &str) -> &Value {
        self.values.get(column_id).unwrap_or(&NULL)
    }

    /// Returns `true` for group rows.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, RowKind::Group { .. })
    }

    /// Returns the column this row is grouped by, if it is a group row.
    pub fn group_by_id(&self) -> Option<&str> {
        match &self.kind {
            RowKind::Group { column_id, .. } => Some(column_id),
            RowKind::Data { .. } => None,
        }
    }

    /// Returns the record path of a data row.
    pub fn path(&self) -> Option<&[usize]> {
        match &self.kind {
            RowKind::Data { path } => Some(path),
            RowKind::Group { .. } => None,
        }
    }

    /// Returns `true` if the row has children to expand.
    pub fn can_expand(&self) -> bool {
        !self.sub_rows.is_empty()
    }

    /// Ids of this row (when it is a data row) and all data rows below it.
    pub fn data_ids(&self) -> Vec<RowId> {
        let mut ids = Vec::new();
        self.collect_data_ids(&mut ids);
        ids
    }

    fn collect_data_ids(&self, out: &mut Vec<RowId>) {
        if !self.is_group() {
            out.push(self.id.clone());
        }
        for sub in &self.sub_rows {
            sub.collect_data_ids(out);
        }
    }

    /// Finds a row by id in this subtree.
    pub fn find(&self, id: &str) -> Option<&Row> {
        if self.id == id {
            return Some(self);
        }
        self.sub_rows.iter().find_map(|sub| sub.find(id))
    }

    /// Sets the depth of this row and shifts its descendants along.
    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
        for sub in &mut self.sub_rows {
            sub.set_depth(depth + 1);
        }
    }
}

/// Decides how a cell is displayed, given the table's `group_by`.
pub fn cell_kind(row: &Row, column: &Column, group_by: &[String]) -> CellKind {
    let column_grouped = group_by.iter().any(|g| *g == column.id);
    if column_grouped && row.group_by_id() == Some(column.id.as_str()) {
        CellKind::Grouped
    } else if column_grouped {
        CellKind::RepeatedValue
    } else if row.is_group() {
        CellKind::Aggregated
    } else {
        CellKind::Plain
    }
}

/// Builds data rows from records, reading every column's value.
pub fn build_rows(records: &[Record], columns: &[Column]) -> Vec<Row> {
    let mut path = Vec::new();
    build_level(records, columns, &mut path)
}

fn build_level(records: &[Record], columns: &[Column], path: &mut Vec<usize>) -> Vec<Row> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            path.push(index);
            let values = columns
                .iter()
                .filter(|c| c.has_value())
                .map(|c| (c.id.clone(), c.value(record)))
                .collect();
            let sub_rows = build_level(record.children(), columns, path);
            let row = Row {
                id: row_id(path),
                index,
                depth: path.len() - 1,
                values,
                sub_rows,
                kind: RowKind::Data { path: path.clone() },
            };
            path.pop();
            row
        })
        .collect()
}

/// Joins an index path into a data row id.
pub fn row_id(path: &[usize]) -> RowId {
    path.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Splits a data row id back into its index path.
pub fn parse_row_id(id: &str) -> Option<Vec<usize>> {
    id.split('.').map(|part| part.parse().ok()).collect()
}
