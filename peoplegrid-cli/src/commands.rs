//! Interactive commands.
//!
//! Each input line is parsed with clap and turned into table actions, edits
//! or output.

use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use log::debug;
use peoplegrid_lib::Table;
use peoplegrid_lib::table::Action;
use peoplegrid_lib::table::CellEditor;
use peoplegrid_lib::table::Column;
use peoplegrid_lib::table::FilterValue;
use peoplegrid_lib::table::column::FilterInput;
use thiserror::Error;

use crate::render;

/// Command error type.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Table(#[from] peoplegrid_lib::Error),
}

impl From<clap::Error> for CommandError {
    fn from(e: clap::Error) -> Self {
        CommandError::Usage(e.render().to_string().trim_end().to_string())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "peoplegrid",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Go to the first page
    First,
    /// Go to the previous page
    #[command(alias = "previous")]
    Prev,
    /// Go to the next page
    Next,
    /// Go to the last page
    Last,
    /// Go to a page (1-based)
    Goto { page: usize },
    /// Set the number of rows per page
    Size { size: usize },
    /// Sort by a column: ascending, descending, then unsorted
    Sort {
        column: String,
        /// Sort descending
        #[arg(long, conflicts_with = "asc")]
        desc: bool,
        /// Sort ascending
        #[arg(long)]
        asc: bool,
        /// Keep the other sorted columns
        #[arg(long)]
        multi: bool,
    },
    /// Filter a column (ranges take MIN MAX, use - for an open end)
    Filter {
        column: String,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Remove a column's filter
    ClearFilter { column: String },
    /// Group or ungroup by a column
    Group { column: String },
    /// Expand or collapse a row
    Expand { row: String },
    /// Select or deselect a row and its sub-rows
    Select { row: String },
    /// Select or deselect every row
    SelectAll,
    /// Edit a cell
    Edit {
        row: String,
        column: String,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Print a row's record as JSON
    Record { row: String },
    /// Restore the original data
    Reset,
    /// Print the table state
    State,
    /// Print the current page
    Show,
    /// Print this help
    Help,
    /// Exit
    #[command(alias = "exit")]
    Quit,
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The table changed; show the page again.
    Render,
    /// Print this text.
    Print(String),
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let parsed = Line::try_parse_from(line.split_whitespace())?;
    Ok(Some(parsed.command))
}

/// Help text for every command.
pub fn help() -> String {
    Line::command().render_help().to_string()
}

/// A table plus its cell editor.
pub struct Session {
    table: Table,
    editor: CellEditor,
}

impl Session {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            editor: CellEditor::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Parses and runs one input line.
    pub fn execute(&mut self, line: &str) -> Result<Option<Outcome>, CommandError> {
        match parse(line)? {
            Some(command) => self.run(command).map(Some),
            None => Ok(None),
        }
    }

    /// Runs one command.
    pub fn run(&mut self, command: Command) -> Result<Outcome, CommandError> {
        debug!("Running command {:?}", command);
        let action = match command {
            Command::First => Action::GotoPage(0),
            Command::Prev => Action::PreviousPage,
            Command::Next => Action::NextPage,
            Command::Last => Action::GotoPage(self.table.view().page_count().saturating_sub(1)),
            Command::Goto { page } => match page.checked_sub(1) {
                Some(index) => Action::GotoPage(index),
                None => return Ok(Outcome::Render),
            },
            Command::Size { size } => {
                let options = &self.table.options().page_size_options;
                if !options.contains(&size) {
                    return Err(CommandError::Invalid(format!(
                        "page size must be one of {:?}",
                        options
                    )));
                }
                Action::SetPageSize(size)
            }
            Command::Sort {
                column,
                desc,
                asc,
                multi,
            } => Action::ToggleSortBy {
                column_id: column,
                desc: match (desc, asc) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                multi,
            },
            Command::Filter { column, value } => {
                let value = filter_value(self.table.column(&column)?, &value)?;
                Action::SetFilter {
                    column_id: column,
                    value: Some(value),
                }
            }
            Command::ClearFilter { column } => Action::SetFilter {
                column_id: column,
                value: None,
            },
            Command::Group { column } => Action::ToggleGroupBy {
                column_id: column,
                grouped: None,
            },
            Command::Expand { row } => Action::ToggleExpanded {
                row_id: row,
                expanded: None,
            },
            Command::Select { row } => Action::ToggleRowSelected {
                row_id: row,
                selected: None,
            },
            Command::SelectAll => Action::ToggleAllRowsSelected { selected: None },
            Command::Edit { row, column, value } => {
                self.edit(&row, &column, value.join(" "))?;
                return Ok(Outcome::Render);
            }
            Command::Reset => {
                self.editor.cancel();
                self.table.reset_data()?;
                return Ok(Outcome::Render);
            }
            Command::Record { row } => return Ok(Outcome::Print(render::render_record(&self.table, &row)?)),
            Command::State => return Ok(Outcome::Print(render::render_state(&self.table))),
            Command::Show => return Ok(Outcome::Render),
            Command::Help => return Ok(Outcome::Print(help())),
            Command::Quit => return Ok(Outcome::Quit),
        };
        self.table.dispatch(action)?;
        Ok(Outcome::Render)
    }

    fn edit(&mut self, row: &str, column: &str, text: String) -> Result<(), CommandError> {
        if let Some(previous) = self.editor.begin(&self.table, row, column)? {
            self.table.commit_edit(previous)?;
        }
        self.editor.input(text);
        match self.editor.commit() {
            Some(commit) => Ok(self.table.commit_edit(commit)?),
            None => Ok(()),
        }
    }
}

/// Turns command words into a filter value for the column's input widget.
fn filter_value(column: &Column, words: &[String]) -> Result<FilterValue, CommandError> {
    let number = |word: &str| {
        word.parse::<f64>()
            .map_err(|_| CommandError::Invalid(format!("'{}' is not a number", word)))
    };
    let bound = |word: Option<&String>| match word.map(String::as_str) {
        None | Some("-") => Ok(None),
        Some(word) => number(word).map(Some),
    };

    match column.filter_input {
        FilterInput::Slider => match words {
            [word] => Ok(FilterValue::Number(number(word.as_str())?)),
            _ => Err(CommandError::Invalid(format!("'{}' takes one number", column.id))),
        },
        FilterInput::NumberRange => match words {
            [_] | [_, _] => Ok(FilterValue::Range(bound(words.first())?, bound(words.get(1))?)),
            _ => Err(CommandError::Invalid(format!("'{}' takes MIN [MAX]", column.id))),
        },
        FilterInput::Text | FilterInput::Select | FilterInput::None => Ok(FilterValue::Text(words.join(" "))),
    }
}
