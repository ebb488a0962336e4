//! Row ordering.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

use super::row::Row;

/// One sort key. Multiple keys sort by the first, then the next, and so on.
///
/// # Example
///
/// ```
/// use peoplegrid_lib::table::sort::SortBy;
///
/// let keys = vec![SortBy::desc("age"), SortBy::asc("lastName")];
/// assert!(keys[0].desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub id: String,
    pub desc: bool,
}

impl SortBy {
    /// Creates an ascending key.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Creates a descending key.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }
}

/// Compares two cell values.
///
/// Numbers compare numerically and come before text; text compares
/// case-insensitively first. `Null` sorts after everything.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => {
                let (x, y) = (a.to_string(), b.to_string());
                x.to_lowercase()
                    .cmp(&y.to_lowercase())
                    .then_with(|| x.cmp(&y))
            }
        },
    }
}

/// Sorts rows by `sort_by`, then each level of sub-rows the same way.
///
/// The sort is stable: rows that compare equal keep their incoming order,
/// so a fuzzy filter's ranking survives among ties.
pub fn sort_rows(rows: &mut [Row], sort_by: &[SortBy]) {
    if sort_by.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        sort_by
            .iter()
            .map(|key| {
                let ord = compare_values(a.value(&key.id), b.value(&key.id));
                if key.desc { ord.reverse() } else { ord }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    for row in rows.iter_mut() {
        sort_rows(&mut row.sub_rows, sort_by);
    }
}
