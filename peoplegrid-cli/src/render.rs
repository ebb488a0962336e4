//! Text rendering of the table.

use peoplegrid_lib::Table;
use peoplegrid_lib::table::CellKind;
use peoplegrid_lib::table::Column;
use peoplegrid_lib::table::Row;
use peoplegrid_lib::table::column::CellRender;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " | ";
const ID_HEADER: &str = "row";

/// Renders header groups, the current page and the pagination bar.
pub fn render_table(table: &Table) -> String {
    let columns = table.visible_columns();
    let page = table.page();

    let gutter: Vec<String> = page
        .iter()
        .map(|row| format!("{}{}", "  ".repeat(row.depth), row.id))
        .collect();
    let headers: Vec<String> = columns.iter().map(|c| header_label(table, c)).collect();
    let body: Vec<Vec<String>> = page
        .iter()
        .map(|row| columns.iter().map(|c| cell_text(table, row, c)).collect())
        .collect();

    let gutter_width = gutter
        .iter()
        .map(|g| g.width())
        .chain([ID_HEADER.width()])
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].width())
                .chain([headers[i].width()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::new();
    let groups = table.header_groups();
    if let Some((_, upper)) = groups.split_last() {
        for group in upper {
            let mut cells = Vec::new();
            let mut i = 0;
            for header in &group.headers {
                let span = header.span();
                let width = widths[i..i + span].iter().sum::<usize>() + SEPARATOR.len() * (span - 1);
                cells.push(pad(&header.label, width));
                i += span;
            }
            lines.push(join_line(pad("", gutter_width), &cells));
        }
    }

    let header_cells: Vec<String> = headers.iter().zip(&widths).map(|(h, w)| pad(h, *w)).collect();
    lines.push(join_line(pad(ID_HEADER, gutter_width), &header_cells));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(rule_line(gutter_width, &rule));

    for (id, cells) in gutter.iter().zip(&body) {
        let cells: Vec<String> = cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        lines.push(join_line(pad(id, gutter_width), &cells));
    }

    lines.push(String::new());
    lines.push(render_pagination(table));
    lines.join("\n")
}

/// The pagination bar: `<< < > >> Page 3 of 10 | Show 10`.
pub fn render_pagination(table: &Table) -> String {
    let view = table.view();
    let state = table.state();
    let enabled = |label: &str, on: bool| if on { label.to_string() } else { " ".repeat(label.len()) };
    format!(
        "{} {} {} {}  Page {} of {} | {} rows | Show {}",
        enabled("<<", view.can_previous_page()),
        enabled("<", view.can_previous_page()),
        enabled(">", view.can_next_page()),
        enabled(">>", view.can_next_page()),
        state.page_index.saturating_add(1),
        view.pagination().page_options().len(),
        view.expanded_len(),
        state.page_size,
    )
}

/// One record, sub-rows included, as pretty JSON.
pub fn render_record(table: &Table, row_id: &str) -> Result<String, peoplegrid_lib::Error> {
    let record = table.record(row_id)?;
    Ok(serde_json::to_string_pretty(record).unwrap_or_default())
}

/// The state block as pretty JSON.
pub fn render_state(table: &Table) -> String {
    table.snapshot().to_json()
}

fn header_label(table: &Table, column: &Column) -> String {
    let state = table.state();
    let mut label = String::new();
    if column.cell == CellRender::Checkbox {
        label.push_str(checkbox(table.is_all_selected()));
    }
    if column.can_group_by {
        label.push_str(if state.is_grouped(&column.id) { "[-] " } else { "[+] " });
    }
    label.push_str(&column.header);
    match state.sort_of(&column.id) {
        Some(sort) if sort.desc => label.push_str(" v"),
        Some(_) => label.push_str(" ^"),
        None => {}
    }
    label
}

fn cell_text(table: &Table, row: &Row, column: &Column) -> String {
    if column.cell == CellRender::Checkbox {
        return checkbox(table.is_selected(row)).to_string();
    }
    let Ok(cell) = table.cell(&row.id, &column.id) else {
        return String::new();
    };
    match cell.kind {
        CellKind::Grouped => {
            let expander = if table.state().expanded.contains(&row.id) { "v" } else { ">" };
            format!("{} {} ({})", expander, cell.value, row.sub_rows.len())
        }
        CellKind::Aggregated if column.aggregate.is_some() => column.render_aggregated(&cell.value),
        CellKind::Aggregated | CellKind::RepeatedValue => String::new(),
        CellKind::Plain => cell.value.to_string(),
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn pad(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

fn join_line(gutter: String, cells: &[String]) -> String {
    let mut line = gutter;
    for cell in cells {
        line.push_str(SEPARATOR);
        line.push_str(cell);
    }
    line.trim_end().to_string()
}

fn rule_line(gutter_width: usize, cells: &[String]) -> String {
    let mut line = "-".repeat(gutter_width);
    for cell in cells {
        line.push_str("-+-");
        line.push_str(cell);
    }
    line
}
