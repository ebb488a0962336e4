//! Aggregate functions for grouped rows.
//!
//! Grouping folds column values bottom-up. The deepest groups reduce the raw
//! values of their data rows with the *leaf* function; every group above
//! re-reduces the already aggregated values of its sub-groups with the
//! *group* function. A two-stage aggregate like `count` then `sum` therefore
//! counts rows per leaf group and sums those counts further up.
//!
//! # Example
//!
//! ```
//! use peoplegrid_lib::aggregate::{Aggregate, AggregateFn};
//! use peoplegrid_lib::model::Value;
//!
//! let names = Aggregate::two_stage(AggregateFn::Sum, AggregateFn::Count);
//! let per_group = names.leaf().apply(&[Value::from("a"), Value::from("b")]);
//! assert_eq!(per_group, Value::Int(2));
//! let total = names.group().apply(&[per_group, Value::Int(3)]);
//! assert_eq!(total, Value::Int(5));
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// A reducer over a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateFn {
    /// Sum of numeric values.
    Sum,
    /// Number of values, numeric or not.
    Count,
    /// Mean of numeric values, rounded to two decimals.
    Average,
    /// Number of distinct values.
    UniqueCount,
    /// Minimum numeric value.
    Min,
    /// Maximum numeric value.
    Max,
    /// Statistical median of numeric values.
    Median,
    /// Midpoint of the value range, rounded. See [`rounded_median`].
    RoundedMedian,
}

impl AggregateFn {
    /// Returns the lower camel-case name.
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFn::Sum => "sum",
            AggregateFn::Count => "count",
            AggregateFn::Average => "average",
            AggregateFn::UniqueCount => "uniqueCount",
            AggregateFn::Min => "min",
            AggregateFn::Max => "max",
            AggregateFn::Median => "median",
            AggregateFn::RoundedMedian => "roundedMedian",
        }
    }

    /// Reduces `values` to one value.
    ///
    /// Numeric reducers ignore non-numeric values. `Average`, `Min`, `Max`
    /// and `Median` return `Null` when there is nothing to reduce; `Sum` and
    /// `RoundedMedian` return 0.
    pub fn apply(&self, values: &[Value]) -> Value {
        match self {
            AggregateFn::Count => Value::from(values.len()),
            AggregateFn::UniqueCount => {
                let unique: HashSet<(&'static str, String)> = values
                    .iter()
                    .map(|v| (v.type_name(), v.to_string()))
                    .collect();
                Value::from(unique.len())
            }
            AggregateFn::Sum => Value::number(sum(&numbers(values))),
            AggregateFn::Average => {
                let nums = numbers(values);
                if nums.is_empty() {
                    return Value::Null;
                }
                let mean = sum(&nums) / nums.len() as f64;
                Value::number(round_half_up(mean * 100.0) / 100.0)
            }
            AggregateFn::Min => numbers(values)
                .into_iter()
                .reduce(f64::min)
                .map_or(Value::Null, Value::number),
            AggregateFn::Max => numbers(values)
                .into_iter()
                .reduce(f64::max)
                .map_or(Value::Null, Value::number),
            AggregateFn::Median => median(&numbers(values)).map_or(Value::Null, Value::number),
            AggregateFn::RoundedMedian => Value::number(rounded_median(&numbers(values))),
        }
    }
}

/// How a column is summarized on group rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregate {
    /// The same function at every level.
    Single(AggregateFn),
    /// `leaf` on raw values, `group` on sub-group results.
    TwoStage { group: AggregateFn, leaf: AggregateFn },
}

impl Aggregate {
    /// Creates a two-stage aggregate. Arguments are in group, leaf order.
    pub fn two_stage(group: AggregateFn, leaf: AggregateFn) -> Self {
        Aggregate::TwoStage { group, leaf }
    }

    /// Function applied to the data rows of the deepest groups.
    pub fn leaf(&self) -> AggregateFn {
        match self {
            Aggregate::Single(f) => *f,
            Aggregate::TwoStage { leaf, .. } => *leaf,
        }
    }

    /// Function applied to sub-group results.
    pub fn group(&self) -> AggregateFn {
        match self {
            Aggregate::Single(f) => *f,
            Aggregate::TwoStage { group, .. } => *group,
        }
    }
}

impl From<AggregateFn> for Aggregate {
    fn from(f: AggregateFn) -> Self {
        Aggregate::Single(f)
    }
}

// =============================================================================
// Numeric helpers
// =============================================================================

/// Returns `round((min + max) / 2)`, or 0 for an empty slice.
///
/// This is the midpoint of the value range, not a statistical median:
/// `[1, 2, 3, 10]` yields 6. Halves round toward positive infinity.
pub fn rounded_median(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    let (min, max) = values
        .iter()
        .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)));
    round_half_up((min + max) / 2.0)
}

/// Rounds to the nearest integer, halves toward positive infinity
/// (`2.5 → 3`, `-2.5 → -2`).
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

fn numbers(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(Value::as_f64).collect()
}

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&v| Value::Int(v)).collect()
    }

    #[test]
    fn test_rounded_median_examples() {
        assert_eq!(rounded_median(&[]), 0.0);
        assert_eq!(rounded_median(&[10.0]), 10.0);
        assert_eq!(rounded_median(&[1.0, 2.0, 3.0, 4.0]), 3.0);
        assert_eq!(rounded_median(&[1.0, 2.0, 3.0, 10.0]), 6.0);
    }

    #[test]
    fn test_rounded_median_halves_round_up() {
        assert_eq!(rounded_median(&[-1.0, -4.0]), -2.0);
        assert_eq!(rounded_median(&[0.0, 5.0]), 3.0);
        assert_eq!(rounded_median(&[0.0, 1.0]), 1.0);
    }

    #[test]
    fn test_rounded_median_matches_formula() {
        let samples: [&[f64]; 4] = [&[7.0, 3.0, 9.0], &[4.0, 4.0], &[99.0, 0.0, 42.0], &[13.0, 8.0, 2.0, 21.0]];
        for v in samples {
            let min = v.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = v.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(rounded_median(v), round_half_up((min + max) / 2.0));
        }
    }

    #[test]
    fn test_basic_functions() {
        let v = ints(&[4, 1, 7, 4]);
        assert_eq!(AggregateFn::Sum.apply(&v), Value::Int(16));
        assert_eq!(AggregateFn::Count.apply(&v), Value::Int(4));
        assert_eq!(AggregateFn::UniqueCount.apply(&v), Value::Int(3));
        assert_eq!(AggregateFn::Average.apply(&v), Value::Int(4));
        assert_eq!(AggregateFn::Min.apply(&v), Value::Int(1));
        assert_eq!(AggregateFn::Max.apply(&v), Value::Int(7));
        assert_eq!(AggregateFn::Median.apply(&v), Value::Int(4));
        assert_eq!(AggregateFn::RoundedMedian.apply(&v), Value::Int(4));
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        assert_eq!(AggregateFn::Average.apply(&ints(&[1, 2, 2])), Value::Float(1.67));
        assert_eq!(AggregateFn::Average.apply(&[]), Value::Null);
    }

    #[test]
    fn test_counts_work_on_strings() {
        let v = vec![Value::from("a"), Value::from("b"), Value::from("a")];
        assert_eq!(AggregateFn::Count.apply(&v), Value::Int(3));
        assert_eq!(AggregateFn::UniqueCount.apply(&v), Value::Int(2));
        assert_eq!(AggregateFn::Sum.apply(&v), Value::Int(0));
    }

    #[test]
    fn test_two_stage_is_reappliable() {
        let agg = Aggregate::two_stage(AggregateFn::Sum, AggregateFn::UniqueCount);
        let a = agg.leaf().apply(&[Value::from("x"), Value::from("x")]);
        let b = agg.leaf().apply(&[Value::from("y"), Value::from("z")]);
        assert_eq!(agg.group().apply(&[a, b]), Value::Int(3));
    }
}
