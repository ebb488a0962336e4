//! Grouping and aggregation of rows.

use std::collections::HashMap;

use crate::model::Value;

use super::column::Column;
use super::row::Row;
use super::row::RowKind;

/// Groups rows by each column of `group_by` in turn.
///
/// Groups appear in the order their value is first seen. Each group row
/// carries its grouping value, the values of enclosing groups, and one
/// aggregate per column that defines one. Aggregates fold bottom-up: the
/// deepest groups reduce their data rows with the leaf function, higher
/// groups reduce their sub-groups' results with the group function.
pub fn group_rows(rows: Vec<Row>, group_by: &[String], columns: &[Column]) -> Vec<Row> {
    if group_by.is_empty() {
        return rows;
    }
    group_level(rows, group_by, columns, 0, None)
}

fn group_level(
    rows: Vec<Row>,
    group_by: &[String],
    columns: &[Column],
    depth: usize,
    parent_id: Option<&str>,
) -> Vec<Row> {
    let column_id = &group_by[depth];
    let buckets = bucket_by(rows, column_id);
    let is_deepest = depth + 1 == group_by.len();

    buckets
        .into_iter()
        .enumerate()
        .map(|(index, (value, mut members))| {
            let part = escape_id_part(&value.to_string());
            let id = match parent_id {
                Some(parent) => format!("{}>{}:{}", parent, column_id, part),
                None => format!("{}:{}", column_id, part),
            };

            let sub_rows = if is_deepest {
                for member in &mut members {
                    member.set_depth(depth + 1);
                }
                members
            } else {
                group_level(members, group_by, columns, depth + 1, Some(&id))
            };

            let values = group_values(&sub_rows, column_id, &value, group_by, columns, is_deepest);
            Row {
                id,
                index,
                depth,
                values,
                sub_rows,
                kind: RowKind::Group {
                    column_id: column_id.clone(),
                    value,
                },
            }
        })
        .collect()
}

/// Percent-escapes the group id delimiters `>` and `:` (and `%` itself).
fn escape_id_part(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '>' => out.push_str("%3E"),
            ':' => out.push_str("%3A"),
            c => out.push(c),
        }
    }
    out
}

/// Splits rows by their value in `column_id`, keeping first-seen order.
fn bucket_by(rows: Vec<Row>, column_id: &str) -> Vec<(Value, Vec<Row>)> {
    let mut positions: HashMap<(&'static str, String), usize> = HashMap::new();
    let mut buckets: Vec<(Value, Vec<Row>)> = Vec::new();
    for row in rows {
        let value = row.value(column_id).clone();
        let key = (value.type_name(), value.to_string());
        match positions.get(&key) {
            Some(&i) => buckets[i].1.push(row),
            None => {
                positions.insert(key, buckets.len());
                buckets.push((value, vec![row]));
            }
        }
    }
    buckets
}

fn group_values(
    sub_rows: &[Row],
    column_id: &str,
    value: &Value,
    group_by: &[String],
    columns: &[Column],
    is_deepest: bool,
) -> HashMap<String, Value> {
    let mut values = HashMap::new();
    for column in columns.iter().filter(|c| c.has_value()) {
        let cell = if column.id == column_id {
            value.clone()
        } else if group_by.contains(&column.id) {
            // Enclosing groups: shared by every member.
            sub_rows
                .first()
                .map(|r| r.value(&column.id).clone())
                .unwrap_or_default()
        } else if let Some(aggregate) = &column.aggregate {
            let inputs: Vec<Value> = sub_rows.iter().map(|r| r.value(&column.id).clone()).collect();
            if is_deepest {
                aggregate.leaf().apply(&inputs)
            } else {
                aggregate.group().apply(&inputs)
            }
        } else {
            Value::Null
        };
        values.insert(column.id.clone(), cell);
    }
    values
}
