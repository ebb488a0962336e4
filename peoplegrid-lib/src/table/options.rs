//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use super::selection::SelectionMode;
use crate::error::Error;

/// Configuration for the table's initial state and paging choices.
///
/// # Example
///
/// ```
/// use peoplegrid_lib::table::TableOptions;
///
/// let options = TableOptions::default()
///     .with_page_size(20)
///     .with_initial_page_index(0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page shown when the table is created or its state is reset.
    ///
    /// Default: 2
    pub initial_page_index: usize,

    /// Page sizes offered by the page-size picker.
    ///
    /// Default: 10, 20, 30, 40, 50
    pub page_size_options: Vec<usize>,

    /// Row selection mode.
    ///
    /// Default: multi
    pub selection_mode: SelectionMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            initial_page_index: 2,
            page_size_options: vec![10, 20, 30, 40, 50],
            selection_mode: SelectionMode::Multi,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the initial page index.
    pub fn with_initial_page_index(mut self, page_index: usize) -> Self {
        self.initial_page_index = page_index;
        self
    }

    /// Sets the page sizes offered by the picker.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Checks that page sizes are positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page_size == 0 {
            return Err(Error::invalid_argument("page_size", "must be at least 1"));
        }
        if self.page_size_options.contains(&0) {
            return Err(Error::invalid_argument(
                "page_size_options",
                "page sizes must be at least 1",
            ));
        }
        Ok(())
    }
}
