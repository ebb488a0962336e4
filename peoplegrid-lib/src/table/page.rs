//! Pagination over the expanded rows.

use std::ops::Range;

/// Page position within a list of rows.
///
/// # Example
///
/// ```
/// use peoplegrid_lib::table::page::Pagination;
///
/// let page = Pagination::new(95, 9, 10);
/// assert_eq!(page.page_count(), 10);
/// assert_eq!(page.range(), 90..95);
/// assert!(!page.can_next_page());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_rows: usize,
    page_index: usize,
    page_size: usize,
}

impl Pagination {
    /// Creates a pagination. A zero page size is treated as one row per page.
    pub fn new(total_rows: usize, page_index: usize, page_size: usize) -> Self {
        Self {
            total_rows,
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// Returns the current page index (0-based).
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of rows being paged.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns the number of pages; zero when there are no rows.
    pub fn page_count(&self) -> usize {
        self.total_rows.div_ceil(self.page_size)
    }

    /// Returns the indexes of every page.
    pub fn page_options(&self) -> Range<usize> {
        0..self.page_count()
    }

    /// Returns the row range of the current page. Empty past the last page.
    pub fn range(&self) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(self.total_rows);
        let end = start.saturating_add(self.page_size).min(self.total_rows);
        start..end
    }

    /// Returns `true` if a previous page exists.
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if a next page exists.
    pub fn can_next_page(&self) -> bool {
        self.page_index.saturating_add(1) < self.page_count()
    }

    /// Returns `true` if `page_index` names an existing page.
    pub fn contains(&self, page_index: usize) -> bool {
        page_index < self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rows() {
        let page = Pagination::new(0, 0, 10);
        assert_eq!(page.page_count(), 0);
        assert_eq!(page.range(), 0..0);
        assert!(!page.can_next_page());
        assert!(!page.can_previous_page());
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = Pagination::new(25, 2, 10);
        assert_eq!(page.range(), 20..25);
        assert_eq!(Pagination::new(25, 7, 10).range(), 25..25);
        assert!(Pagination::new(25, 7, 10).can_previous_page());
    }

    #[test]
    fn test_contains() {
        let page = Pagination::new(30, 0, 10);
        assert!(page.contains(2));
        assert!(!page.contains(3));
    }

    #[test]
    fn test_extreme_indices_saturate() {
        let page = Pagination::new(10, usize::MAX, 10);
        assert!(!page.can_next_page());
        assert!(page.can_previous_page());
        assert_eq!(page.range(), 10..10);

        let page = Pagination::new(10, 0, usize::MAX);
        assert_eq!(page.page_count(), 1);
        assert_eq!(page.range(), 0..10);
    }
}
