//! Hierarchical person record

use serde::Deserialize;
use serde::Serialize;

use super::Person;
use super::Value;
use crate::error::FieldError;

/// A person plus optional child records.
///
/// A record whose `sub_rows` is `None` is a leaf. Records with children are
/// the internal nodes produced by multi-level generation.
///
/// # Example
///
/// ```
/// use peoplegrid_lib::model::{Person, Record, Status};
///
/// let person = Person {
///     first_name: "ada".into(),
///     last_name: "byron".into(),
///     age: 36,
///     visits: 12,
///     progress: 80,
///     status: Status::Single,
/// };
/// let parent = Record::new(person.clone()).with_sub_rows(vec![Record::new(person)]);
/// assert!(!parent.is_leaf());
/// assert_eq!(parent.get("age").unwrap().as_f64(), Some(36.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(flatten)]
    pub person: Person,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_rows: Option<Vec<Record>>,
}

impl Record {
    /// Creates a leaf record.
    pub fn new(person: Person) -> Self {
        Self {
            person,
            sub_rows: None,
        }
    }

    /// Attaches children (builder pattern).
    pub fn with_sub_rows(mut self, sub_rows: Vec<Record>) -> Self {
        self.sub_rows = Some(sub_rows);
        self
    }

    /// Returns `true` if the record has no `sub_rows`.
    pub fn is_leaf(&self) -> bool {
        self.sub_rows.is_none()
    }

    /// Returns the children, or an empty slice for leaves.
    pub fn children(&self) -> &[Record] {
        self.sub_rows.as_deref().unwrap_or(&[])
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// Reads a field by its column id.
    pub fn get(&self, field: &str) -> Result<Value, FieldError> {
        self.person.get(field)
    }

    /// Writes a field by its column id, coercing edit text.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), FieldError> {
        self.person.set(field, value.into())
    }

    // =========================================================================
    // Tree helpers
    // =========================================================================

    /// Number of records in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Record::count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Record::depth).max().unwrap_or(0)
    }
}

/// Follows an index path (`[3, 1]` is the second child of the fourth record).
pub fn record_at<'a>(records: &'a [Record], path: &[usize]) -> Option<&'a Record> {
    let (first, rest) = path.split_first()?;
    let record = records.get(*first)?;
    if rest.is_empty() {
        Some(record)
    } else {
        record_at(record.sub_rows.as_deref()?, rest)
    }
}

/// Mutable variant of [`record_at`].
pub fn record_at_mut<'a>(records: &'a mut [Record], path: &[usize]) -> Option<&'a mut Record> {
    let (first, rest) = path.split_first()?;
    let record = records.get_mut(*first)?;
    if rest.is_empty() {
        Some(record)
    } else {
        record_at_mut(record.sub_rows.as_deref_mut()?, rest)
    }
}
