//! Inline cell editing.
//!
//! An editable cell keeps a local buffer while it has focus. Typing only
//! changes the buffer; leaving the cell (commit) hands the buffer to the
//! table as one [`CellCommit`].

use super::Table;
use super::row::CellKind;
use super::row::RowId;
use crate::error::Error;

/// A finished edit, ready for [`Table::commit_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCommit {
    pub row_id: RowId,
    pub column_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveEdit {
    row_id: RowId,
    column_id: String,
    buffer: String,
}

/// Local edit buffer for at most one cell at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellEditor {
    active: Option<ActiveEdit>,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focuses a cell, seeding the buffer with its current value.
    ///
    /// Only plain cells of editable columns can be edited. An edit already in
    /// progress is committed first and returned.
    pub fn begin(&mut self, table: &Table, row_id: &str, column_id: &str) -> Result<Option<CellCommit>, Error> {
        let cell = table.cell(row_id, column_id)?;
        if !cell.editable || cell.kind != CellKind::Plain {
            return Err(Error::NotEditable {
                row: row_id.to_string(),
                column: column_id.to_string(),
            });
        }

        let previous = self.commit();
        self.active = Some(ActiveEdit {
            row_id: row_id.to_string(),
            column_id: column_id.to_string(),
            buffer: cell.value.to_string(),
        });
        Ok(previous)
    }

    /// Replaces the buffer. Ignored when no cell is focused.
    pub fn input(&mut self, text: impl Into<String>) {
        if let Some(active) = &mut self.active {
            active.buffer = text.into();
        }
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.buffer.as_str())
    }

    /// Returns `true` while a cell is focused.
    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Ends the edit and yields its commit. A second call yields nothing.
    pub fn commit(&mut self) -> Option<CellCommit> {
        self.active.take().map(|a| CellCommit {
            row_id: a.row_id,
            column_id: a.column_id,
            value: a.buffer,
        })
    }

    /// Ends the edit without committing.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;
    use crate::model::Record;
    use crate::model::Status;
    use crate::table::TableOptions;
    use crate::table::demo_columns;

    fn table() -> Table {
        let person = Person {
            first_name: "ada".into(),
            last_name: "byron".into(),
            age: 36,
            visits: 12,
            progress: 80,
            status: Status::Single,
        };
        let data = vec![Record::new(person.clone()), Record::new(person)];
        Table::new(demo_columns(), data, TableOptions::new().with_initial_page_index(0)).unwrap()
    }

    #[test]
    fn test_commit_once() {
        let table = table();
        let mut editor = CellEditor::new();
        assert_eq!(editor.begin(&table, "1", "age").unwrap(), None);
        assert_eq!(editor.buffer(), Some("36"));
        editor.input("37");
        let commit = editor.commit().unwrap();
        assert_eq!(commit.value, "37");
        assert_eq!(commit.row_id, "1");
        assert!(editor.commit().is_none());
    }

    #[test]
    fn test_begin_commits_previous_edit() {
        let table = table();
        let mut editor = CellEditor::new();
        editor.begin(&table, "0", "firstName").unwrap();
        editor.input("grace");
        let previous = editor.begin(&table, "1", "firstName").unwrap().unwrap();
        assert_eq!(previous.row_id, "0");
        assert_eq!(previous.value, "grace");
    }

    #[test]
    fn test_cancel_and_display_column() {
        let table = table();
        let mut editor = CellEditor::new();
        editor.begin(&table, "0", "age").unwrap();
        editor.cancel();
        assert!(!editor.is_editing());
        assert!(matches!(
            editor.begin(&table, "0", "selection"),
            Err(Error::NotEditable { .. })
        ));
    }
}
