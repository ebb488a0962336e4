//! Column filters.
//!
//! Every filter is a pure function from a row snapshot to the subset of rows
//! it keeps. [`filter_rows`] applies the table's active filters level by
//! level, descending into the sub-rows of every row that survives.
//!
//! # Example
//!
//! ```
//! use peoplegrid_lib::table::filter::{FilterKind, FilterValue};
//!
//! let kind = FilterKind::GreaterThan;
//! assert!(FilterValue::Text(String::new()).is_empty());
//! assert!(!FilterValue::Number(20.0).is_empty());
//! assert_eq!(kind.name(), "greaterThan");
//! ```

use std::collections::HashSet;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

use super::row::Row;

/// Predicate used by a column's filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// Lower-cased prefix match. `Null` values pass.
    Text,
    /// Fuzzy subsequence match, best matches first.
    FuzzyText,
    /// Value equals the filter value.
    Equals,
    /// Inclusive numeric range with optional ends.
    Between,
    /// String value contains the filter text.
    Includes,
    /// Numeric value is at least the filter value. `Null` values are dropped.
    GreaterThan,
}

impl FilterKind {
    /// Returns the lower camel-case name.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Text => "text",
            FilterKind::FuzzyText => "fuzzyText",
            FilterKind::Equals => "equals",
            FilterKind::Between => "between",
            FilterKind::Includes => "includes",
            FilterKind::GreaterThan => "greaterThan",
        }
    }

    /// Applies this predicate to one level of rows.
    pub fn apply(&self, rows: Vec<Row>, column_id: &str, value: &FilterValue) -> Vec<Row> {
        match self {
            FilterKind::Text => filter_starts_with(rows, column_id, &value.as_text()),
            FilterKind::FuzzyText => filter_fuzzy_text(rows, column_id, &value.as_text()),
            FilterKind::Equals => filter_equals(rows, column_id, value),
            FilterKind::Between => {
                let (min, max) = value.as_range();
                filter_between(rows, column_id, min, max)
            }
            FilterKind::Includes => filter_includes(rows, column_id, &value.as_text()),
            FilterKind::GreaterThan => match value.as_number() {
                Some(n) => filter_greater_than(rows, column_id, n),
                None => Vec::new(),
            },
        }
    }
}

/// A filter value as entered in a filter input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    /// `[min, max]`, either end open.
    Range(Option<f64>, Option<f64>),
}

impl FilterValue {
    /// Returns `true` for values that remove the filter instead of applying it:
    /// empty text and a range open at both ends.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Range(min, max) => min.is_none() && max.is_none(),
            FilterValue::Number(_) => false,
        }
    }

    /// Returns the value as filter text.
    pub fn as_text(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Number(n) => Value::number(*n).to_string(),
            FilterValue::Range(min, max) => format!(
                "{}..{}",
                min.map(|n| n.to_string()).unwrap_or_default(),
                max.map(|n| n.to_string()).unwrap_or_default()
            ),
        }
    }

    /// Returns the value as a number, parsing text when needed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse().ok(),
            FilterValue::Range(..) => None,
        }
    }

    /// Returns the value as a range. A single number is a one-point range.
    pub fn as_range(&self) -> (Option<f64>, Option<f64>) {
        match self {
            FilterValue::Range(min, max) => (*min, *max),
            other => {
                let n = other.as_number();
                (n, n)
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Number(v)
    }
}

/// An active filter: column id and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub id: String,
    pub value: FilterValue,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// Keeps rows whose numeric value is `>= filter_value`.
///
/// Rows without a numeric value are dropped.
pub fn filter_greater_than(rows: Vec<Row>, column_id: &str, filter_value: f64) -> Vec<Row> {
    rows.into_iter()
        .filter(|row| {
            row.value(column_id)
                .as_f64()
                .is_some_and(|v| v >= filter_value)
        })
        .collect()
}

/// Keeps rows whose lower-cased value starts with the lower-cased filter.
///
/// Rows without a value pass through unfiltered.
pub fn filter_starts_with(rows: Vec<Row>, column_id: &str, filter_value: &str) -> Vec<Row> {
    let prefix = filter_value.to_lowercase();
    rows.into_iter()
        .filter(|row| {
            let value = row.value(column_id);
            value.is_null() || value.to_string().to_lowercase().starts_with(&prefix)
        })
        .collect()
}

/// Keeps rows whose value fuzzy-matches the filter, best match first.
///
/// Matching ignores case; equal scores keep their input order. An empty
/// filter keeps every row.
pub fn filter_fuzzy_text(rows: Vec<Row>, column_id: &str, filter_value: &str) -> Vec<Row> {
    if filter_value.is_empty() {
        return rows;
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        filter_value,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut scored: Vec<(u32, Row)> = rows
        .into_iter()
        .filter_map(|row| {
            let label = row.value(column_id).to_string();
            let haystack = Utf32Str::new(&label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| (score, row))
        })
        .collect();

    // Sort by score descending (higher score = better match)
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, row)| row).collect()
}

/// Keeps rows whose value equals the filter value.
///
/// Numbers compare numerically, anything else by its text.
pub fn filter_equals(rows: Vec<Row>, column_id: &str, filter_value: &FilterValue) -> Vec<Row> {
    let number = filter_value.as_number();
    let text = filter_value.as_text();
    rows.into_iter()
        .filter(|row| {
            let value = row.value(column_id);
            match (value.as_f64(), number) {
                (Some(v), Some(n)) => v == n,
                _ => !value.is_null() && value.to_string() == text,
            }
        })
        .collect()
}

/// Keeps rows whose numeric value lies in `[min, max]`.
///
/// Open ends are unbounded; reversed bounds are swapped.
pub fn filter_between(rows: Vec<Row>, column_id: &str, min: Option<f64>, max: Option<f64>) -> Vec<Row> {
    let mut lo = min.unwrap_or(f64::NEG_INFINITY);
    let mut hi = max.unwrap_or(f64::INFINITY);
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    rows.into_iter()
        .filter(|row| {
            row.value(column_id)
                .as_f64()
                .is_some_and(|v| v >= lo && v <= hi)
        })
        .collect()
}

/// Keeps rows whose text contains the filter text.
pub fn filter_includes(rows: Vec<Row>, column_id: &str, filter_value: &str) -> Vec<Row> {
    rows.into_iter()
        .filter(|row| {
            let value = row.value(column_id);
            !value.is_null() && value.to_string().contains(filter_value)
        })
        .collect()
}

/// Applies `(kind, filter)` pairs to `rows` and, recursively, to the
/// sub-rows of every row kept.
pub fn filter_rows(rows: Vec<Row>, filters: &[(FilterKind, &ColumnFilter)]) -> Vec<Row> {
    if filters.is_empty() {
        return rows;
    }
    let kept = filters
        .iter()
        .fold(rows, |rows, (kind, filter)| kind.apply(rows, &filter.id, &filter.value));
    kept.into_iter()
        .map(|mut row| {
            if !row.sub_rows.is_empty() {
                row.sub_rows = filter_rows(std::mem::take(&mut row.sub_rows), filters);
            }
            row
        })
        .collect()
}

// =============================================================================
// Facets
// =============================================================================

/// Distinct values of a column in first-appearance order, over all rows and
/// their sub-rows. Used for select filter options.
pub fn unique_values(rows: &[Row], column_id: &str) -> Vec<Value> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    collect_unique(rows, column_id, &mut seen, &mut out);
    out
}

fn collect_unique(rows: &[Row], column_id: &str, seen: &mut HashSet<String>, out: &mut Vec<Value>) {
    for row in rows {
        let value = row.value(column_id);
        if !value.is_null() && seen.insert(value.to_string()) {
            out.push(value.clone());
        }
        collect_unique(&row.sub_rows, column_id, seen, out);
    }
}

/// Smallest and largest numeric value of a column. Used for slider bounds.
pub fn min_max(rows: &[Row], column_id: &str) -> Option<(f64, f64)> {
    rows.iter().fold(None, |acc, row| {
        let acc = match (acc, row.value(column_id).as_f64()) {
            (None, Some(v)) => Some((v, v)),
            (Some((lo, hi)), Some(v)) => Some((lo.min(v), hi.max(v))),
            (acc, None) => acc,
        };
        match (acc, min_max(&row.sub_rows, column_id)) {
            (None, sub) => sub,
            (Some(a), None) => Some(a),
            (Some((lo, hi)), Some((slo, shi))) => Some((lo.min(slo), hi.max(shi))),
        }
    })
}
