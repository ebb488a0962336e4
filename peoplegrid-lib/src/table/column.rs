//! Column descriptors.
//!
//! A [`Column`] carries every per-column behavior as a tagged variant: how
//! the value is read ([`Accessor`]), how rows are filtered ([`FilterKind`])
//! and which input drives the filter ([`FilterInput`]), how group rows are
//! summarized ([`Aggregate`]) and how the cell is rendered ([`CellRender`]).

use crate::aggregate::Aggregate;
use crate::aggregate::AggregateFn;
use crate::model::Record;
use crate::model::Value;
use crate::model::fields;

use super::filter::FilterKind;

/// Id of the checkbox column in [`demo_columns`].
pub const SELECTION_COLUMN: &str = "selection";

/// How a column reads its value from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// A record field, by column id.
    Field(String),
    /// Display-only column without a value.
    None,
}

/// Widget that edits a column's filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    /// Free text box.
    Text,
    /// Single value picked between the column's min and max.
    Slider,
    /// Min and max boxes.
    NumberRange,
    /// One of the column's unique values.
    Select,
    /// No filter input.
    None,
}

/// How plain cells of a column are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRender {
    /// Text input committed on blur.
    Editable,
    /// Row selection checkbox.
    Checkbox,
    /// Read-only text.
    Text,
}

/// A table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: String,
    pub header: String,
    /// Header of the column group this column sits under.
    pub parent: Option<String>,
    pub accessor: Accessor,
    pub filter: FilterKind,
    pub filter_input: FilterInput,
    pub aggregate: Option<Aggregate>,
    /// Appended to aggregated values, e.g. `" (avg)"`.
    pub aggregated_suffix: Option<String>,
    pub cell: CellRender,
    /// Grouped columns are moved right after this column.
    pub group_by_boundary: bool,
    pub can_sort: bool,
    pub can_filter: bool,
    pub can_group_by: bool,
}

impl Column {
    /// Creates a data column reading the record field named `id`.
    ///
    /// Defaults to the prefix text filter and an editable cell.
    pub fn accessor(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Field(id.clone()),
            id,
            header: header.into(),
            parent: None,
            filter: FilterKind::Text,
            filter_input: FilterInput::Text,
            aggregate: None,
            aggregated_suffix: None,
            cell: CellRender::Editable,
            group_by_boundary: false,
            can_sort: true,
            can_filter: true,
            can_group_by: true,
        }
    }

    /// Creates a display column with no value, no sorting, filtering or grouping.
    pub fn display(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            parent: None,
            accessor: Accessor::None,
            filter: FilterKind::Text,
            filter_input: FilterInput::None,
            aggregate: None,
            aggregated_suffix: None,
            cell: CellRender::Text,
            group_by_boundary: false,
            can_sort: false,
            can_filter: false,
            can_group_by: false,
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Places the column under a group header.
    pub fn under(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the filter predicate and the input that drives it.
    pub fn filter(mut self, kind: FilterKind, input: FilterInput) -> Self {
        self.filter = kind;
        self.filter_input = input;
        self
    }

    /// Sets the aggregate and the label suffix of aggregated cells.
    pub fn aggregate(mut self, aggregate: impl Into<Aggregate>, suffix: impl Into<String>) -> Self {
        self.aggregate = Some(aggregate.into());
        self.aggregated_suffix = Some(suffix.into());
        self
    }

    /// Sets the cell renderer.
    pub fn cell(mut self, cell: CellRender) -> Self {
        self.cell = cell;
        self
    }

    /// Marks the column as the group-by boundary.
    pub fn group_by_boundary(mut self) -> Self {
        self.group_by_boundary = true;
        self
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Reads this column's value from a record. Missing fields read as `Null`.
    pub fn value(&self, record: &Record) -> Value {
        match &self.accessor {
            Accessor::Field(field) => record.get(field).unwrap_or_default(),
            Accessor::None => Value::Null,
        }
    }

    /// Returns `true` if the column reads a record field.
    pub fn has_value(&self) -> bool {
        matches!(self.accessor, Accessor::Field(_))
    }

    /// Renders an aggregated value with the column's suffix.
    pub fn render_aggregated(&self, value: &Value) -> String {
        match &self.aggregated_suffix {
            Some(suffix) => format!("{}{}", value, suffix),
            None => value.to_string(),
        }
    }
}

/// The column set of the demo table.
pub fn demo_columns() -> Vec<Column> {
    vec![
        Column::display(SELECTION_COLUMN, "")
            .cell(CellRender::Checkbox)
            .group_by_boundary(),
        Column::accessor(fields::FIRST_NAME, "First Name")
            .under("Name")
            .aggregate(Aggregate::two_stage(AggregateFn::Sum, AggregateFn::Count), " Names"),
        Column::accessor(fields::LAST_NAME, "Last Name")
            .under("Name")
            .filter(FilterKind::FuzzyText, FilterInput::Text)
            .aggregate(
                Aggregate::two_stage(AggregateFn::Sum, AggregateFn::UniqueCount),
                " Unique Names",
            ),
        Column::accessor(fields::AGE, "Age")
            .under("Info")
            .filter(FilterKind::Equals, FilterInput::Slider)
            .aggregate(AggregateFn::Average, " (avg)"),
        Column::accessor(fields::VISITS, "Visits")
            .under("Info")
            .filter(FilterKind::Between, FilterInput::NumberRange)
            .aggregate(AggregateFn::Sum, " (total)"),
        Column::accessor(fields::STATUS, "Status")
            .under("Info")
            .filter(FilterKind::Includes, FilterInput::Select),
        Column::accessor(fields::PROGRESS, "Profile Progress")
            .under("Info")
            .filter(FilterKind::GreaterThan, FilterInput::Slider)
            .aggregate(AggregateFn::RoundedMedian, " (med)"),
    ]
}

// =============================================================================
// Header groups
// =============================================================================

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub label: String,
    /// Leaf columns spanned by this header.
    pub column_ids: Vec<String>,
    /// Filler above a column that has no group header.
    pub placeholder: bool,
}

impl Header {
    /// Number of leaf columns spanned.
    pub fn span(&self) -> usize {
        self.column_ids.len()
    }
}

/// One row of headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGroup {
    pub headers: Vec<Header>,
}

/// Builds header rows for columns in display order.
///
/// Adjacent columns sharing a parent are merged under one header. When no
/// column has a parent, only the leaf row is returned.
pub fn header_groups(columns: &[&Column]) -> Vec<HeaderGroup> {
    let leaf = HeaderGroup {
        headers: columns
            .iter()
            .map(|c| Header {
                label: c.header.clone(),
                column_ids: vec![c.id.clone()],
                placeholder: false,
            })
            .collect(),
    };
    if columns.iter().all(|c| c.parent.is_none()) {
        return vec![leaf];
    }

    let mut top: Vec<Header> = Vec::new();
    let mut last_parent: Option<&str> = None;
    for column in columns {
        let parent = column.parent.as_deref();
        match (parent, top.last_mut()) {
            (Some(p), Some(header)) if last_parent == Some(p) => {
                header.column_ids.push(column.id.clone());
            }
            _ => top.push(Header {
                label: parent.unwrap_or_default().to_string(),
                column_ids: vec![column.id.clone()],
                placeholder: parent.is_none(),
            }),
        }
        last_parent = parent;
    }
    vec![HeaderGroup { headers: top }, leaf]
}

/// Orders columns for display: everything up to the group-by boundary, then
/// grouped columns in `group_by` order, then the remaining columns.
pub fn visible_columns<'a>(columns: &'a [Column], group_by: &[String]) -> Vec<&'a Column> {
    let boundary = columns
        .iter()
        .position(|c| c.group_by_boundary)
        .map_or(0, |i| i + 1);
    let is_grouped = |c: &Column| group_by.iter().any(|g| *g == c.id);

    let mut ordered: Vec<&Column> = columns[..boundary]
        .iter()
        .filter(|c| !is_grouped(c))
        .collect();
    ordered.extend(
        group_by
            .iter()
            .filter_map(|id| columns.iter().find(|c| c.id == *id)),
    );
    ordered.extend(columns[boundary..].iter().filter(|c| !is_grouped(c)));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_header_groups() {
        let columns = demo_columns();
        let refs: Vec<&Column> = columns.iter().collect();
        let groups = header_groups(&refs);
        assert_eq!(groups.len(), 2);
        let top: Vec<(&str, usize, bool)> = groups[0]
            .headers
            .iter()
            .map(|h| (h.label.as_str(), h.span(), h.placeholder))
            .collect();
        assert_eq!(top, vec![("", 1, true), ("Name", 2, false), ("Info", 4, false)]);
        assert_eq!(groups[1].headers.len(), 7);
    }

    #[test]
    fn test_visible_columns_moves_grouped_after_boundary() {
        let columns = demo_columns();
        let group_by = vec!["status".to_string(), "age".to_string()];
        let ids: Vec<&str> = visible_columns(&columns, &group_by)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["selection", "status", "age", "firstName", "lastName", "visits", "progress"]
        );
    }

    #[test]
    fn test_grouping_splits_parent_headers() {
        let columns = demo_columns();
        let group_by = vec!["status".to_string()];
        let visible = visible_columns(&columns, &group_by);
        let groups = header_groups(&visible);
        let labels: Vec<&str> = groups[0].headers.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["", "Info", "Name", "Info"]);
    }

    #[test]
    fn test_render_aggregated() {
        let columns = demo_columns();
        assert_eq!(columns[3].render_aggregated(&Value::Float(14.5)), "14.5 (avg)");
        assert_eq!(columns[5].render_aggregated(&Value::from("single")), "single");
    }
}
