use peoplegrid_lib::Error;
use peoplegrid_lib::Table;
use peoplegrid_lib::generate::make_data_with;
use peoplegrid_lib::model::Person;
use peoplegrid_lib::model::Record;
use peoplegrid_lib::model::Status;
use peoplegrid_lib::model::Value;
use peoplegrid_lib::table::Action;
use peoplegrid_lib::table::FilterValue;
use peoplegrid_lib::table::TableOptions;
use peoplegrid_lib::table::demo_columns;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn generated(len: usize) -> Table {
    let data = make_data_with(&mut StdRng::seed_from_u64(3), &[len]);
    Table::new(demo_columns(), data, TableOptions::default()).unwrap()
}

fn person(first_name: &str, last_name: &str, age: u32, status: Status) -> Record {
    Record::new(Person {
        first_name: first_name.into(),
        last_name: last_name.into(),
        age,
        visits: age * 2,
        progress: 50,
        status,
    })
}

fn small() -> Table {
    let data = vec![
        person("ann", "doe", 30, Status::Single),
        person("bob", "doe", 10, Status::Single),
        person("cid", "roe", 20, Status::Single),
        person("dee", "doe", 25, Status::Complicated),
    ];
    Table::new(demo_columns(), data, TableOptions::new().with_initial_page_index(0)).unwrap()
}

fn nested(lens: &[usize]) -> Table {
    let data = make_data_with(&mut StdRng::seed_from_u64(5), lens);
    Table::new(demo_columns(), data, TableOptions::new().with_initial_page_index(0)).unwrap()
}

fn select(row_id: &str) -> Action {
    Action::ToggleRowSelected {
        row_id: row_id.into(),
        selected: Some(true),
    }
}

fn page_ids(table: &Table) -> Vec<String> {
    table.page().iter().map(|r| r.id.clone()).collect()
}

fn visible_ids(table: &Table) -> Vec<String> {
    table.view().expanded_rows().map(|r| r.id.clone()).collect()
}

fn sort(column_id: &str) -> Action {
    Action::ToggleSortBy {
        column_id: column_id.into(),
        desc: None,
        multi: false,
    }
}

fn group(column_id: &str) -> Action {
    Action::ToggleGroupBy {
        column_id: column_id.into(),
        grouped: None,
    }
}

fn expand(row_id: &str) -> Action {
    Action::ToggleExpanded {
        row_id: row_id.into(),
        expanded: None,
    }
}

// =============================================================================
// Paging
// =============================================================================

#[test]
fn test_initial_page() {
    let table = generated(95);
    assert_eq!(table.state().page_index, 2);
    assert_eq!(table.state().page_size, 10);
    assert_eq!(table.view().page_count(), 10);
    assert_eq!(page_ids(&table).first().map(String::as_str), Some("20"));
}

#[test]
fn test_paging_bounds() {
    let mut table = generated(95);
    table.dispatch(Action::GotoPage(9)).unwrap();
    assert_eq!(table.page().len(), 5);
    assert!(!table.view().can_next_page());

    table.dispatch(Action::NextPage).unwrap();
    assert_eq!(table.state().page_index, 9);
    table.dispatch(Action::GotoPage(10)).unwrap();
    assert_eq!(table.state().page_index, 9);

    table.dispatch(Action::GotoPage(0)).unwrap();
    table.dispatch(Action::PreviousPage).unwrap();
    assert_eq!(table.state().page_index, 0);
    assert!(!table.view().can_previous_page());
}

#[test]
fn test_page_size_keeps_top_row() {
    let mut table = generated(95);
    table.dispatch(Action::GotoPage(3)).unwrap();
    table.dispatch(Action::SetPageSize(20)).unwrap();
    assert_eq!(table.state().page_index, 1);
    assert_eq!(table.state().page_size, 20);
    assert_eq!(page_ids(&table).first().map(String::as_str), Some("20"));

    let err = table.dispatch(Action::SetPageSize(0)).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(table.state().page_size, 20);
}

#[test]
fn test_huge_page_size_saturates() {
    let data = make_data_with(&mut StdRng::seed_from_u64(3), &[30]);
    let options = TableOptions::default().with_page_size(usize::MAX);
    let mut table = Table::new(demo_columns(), data, options).unwrap();
    assert!(table.page().is_empty());

    table.dispatch(Action::SetPageSize(10)).unwrap();
    assert_eq!(table.state().page_size, 10);
    assert_eq!(table.state().page_index, usize::MAX / 10);
    table.dispatch(Action::NextPage).unwrap();
    assert_eq!(table.state().page_index, usize::MAX / 10);
    assert!(!table.view().can_next_page());
}

#[test]
fn test_huge_page_index_saturates() {
    let data = make_data_with(&mut StdRng::seed_from_u64(3), &[30]);
    let options = TableOptions::default().with_initial_page_index(usize::MAX);
    let mut table = Table::new(demo_columns(), data, options).unwrap();
    assert!(!table.view().can_next_page());

    table.dispatch(Action::NextPage).unwrap();
    table.dispatch(Action::SetPageSize(20)).unwrap();
    assert!(table.page().is_empty());
    table.dispatch(Action::GotoPage(0)).unwrap();
    assert_eq!(page_ids(&table).len(), 20);
}

// =============================================================================
// Sorting and filtering
// =============================================================================

#[test]
fn test_sort_cycle() {
    let mut table = small();
    table.dispatch(sort("age")).unwrap();
    assert_eq!(page_ids(&table), vec!["1", "2", "3", "0"]);
    table.dispatch(sort("age")).unwrap();
    assert_eq!(page_ids(&table), vec!["0", "3", "2", "1"]);
    table.dispatch(sort("age")).unwrap();
    assert!(table.state().sort_by.is_empty());
    assert_eq!(page_ids(&table), vec!["0", "1", "2", "3"]);
}

#[test]
fn test_sort_unknown_or_display_column() {
    let mut table = small();
    assert!(matches!(table.dispatch(sort("nope")), Err(Error::UnknownColumn(_))));
    assert!(table.dispatch(sort("selection")).is_err());
}

#[test]
fn test_sort_resets_page() {
    let mut table = generated(95);
    table.dispatch(sort("visits")).unwrap();
    assert_eq!(table.state().page_index, 0);
}

#[test]
fn test_filter_resets_page_and_auto_removes() {
    let mut table = generated(95);
    table
        .dispatch(Action::SetFilter {
            column_id: "status".into(),
            value: Some(FilterValue::from("single")),
        })
        .unwrap();
    assert_eq!(table.state().page_index, 0);
    assert!(
        table
            .view()
            .expanded_rows()
            .all(|r| r.value("status") == &Value::from("single"))
    );

    table
        .dispatch(Action::SetFilter {
            column_id: "status".into(),
            value: Some(FilterValue::from("")),
        })
        .unwrap();
    assert!(table.state().filters.is_empty());
    assert_eq!(table.view().expanded_len(), 95);
}

#[test]
fn test_between_and_greater_than_filters() {
    let mut table = small();
    table
        .dispatch(Action::SetFilter {
            column_id: "visits".into(),
            value: Some(FilterValue::Range(Some(40.0), Some(50.0))),
        })
        .unwrap();
    assert_eq!(page_ids(&table), vec!["2", "3"]);

    table.dispatch(Action::SetAllFilters(Vec::new())).unwrap();
    table
        .dispatch(Action::SetFilter {
            column_id: "progress".into(),
            value: Some(FilterValue::Number(60.0)),
        })
        .unwrap();
    assert!(table.page().is_empty());
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn test_edit_keeps_page() {
    let mut table = generated(95);
    table.update_my_data(25, "firstName", "zed").unwrap();
    assert_eq!(table.state().page_index, 2);
    assert_eq!(table.cell("25", "firstName").unwrap().value, Value::from("zed"));
}

#[test]
fn test_data_changed_resets_page_unless_preserved() {
    let mut table = generated(95);
    table.dispatch(Action::DataChanged { preserve_view: true }).unwrap();
    assert_eq!(table.state().page_index, 2);
    table.dispatch(Action::DataChanged { preserve_view: false }).unwrap();
    assert_eq!(table.state().page_index, 0);
}

#[test]
fn test_replace_data_drops_view_state() {
    let mut table = nested(&[50, 2]);
    table.dispatch(select("40")).unwrap();
    table.dispatch(expand("40")).unwrap();
    assert_eq!(table.state().selected_rows.len(), 3);

    let data = vec![
        person("ann", "doe", 30, Status::Single),
        person("bob", "doe", 10, Status::Single),
        person("cid", "roe", 20, Status::Single),
    ];
    table.replace_data(data, false).unwrap();
    assert!(table.state().selected_rows.is_empty());
    assert!(table.state().expanded.is_empty());

    let parsed: serde_json::Value = serde_json::from_str(&table.snapshot().to_json()).unwrap();
    assert_eq!(parsed["selectedRows"], serde_json::json!([]));
}

#[test]
fn test_replace_data_preserving_view_keeps_known_ids() {
    let mut table = nested(&[50, 2]);
    table.dispatch(select("1")).unwrap();
    table.dispatch(select("40")).unwrap();
    table.dispatch(expand("1")).unwrap();
    table.dispatch(expand("40")).unwrap();

    let data = make_data_with(&mut StdRng::seed_from_u64(8), &[3, 2]);
    table.replace_data(data, true).unwrap();
    let selected: Vec<_> = table.state().selected_rows.iter().map(String::as_str).collect();
    assert_eq!(selected, vec!["1", "1.0", "1.1"]);
    let expanded: Vec<_> = table.state().expanded.iter().map(String::as_str).collect();
    assert_eq!(expanded, vec!["1"]);
    assert!(selected.iter().all(|id| table.record(id).is_ok()));
}

#[test]
fn test_edit_keeps_group_expansion() {
    let mut table = small();
    table.dispatch(group("status")).unwrap();
    table.dispatch(expand("status:single")).unwrap();
    table.update_my_data(0, "age", 31).unwrap();
    assert!(table.state().expanded.contains("status:single"));
    assert_eq!(table.view().expanded_len(), 5);
}

#[test]
fn test_record_lookup() {
    let table = nested(&[4, 2]);
    assert_eq!(table.record("2.1").unwrap(), &table.data()[2].sub_rows.as_ref().unwrap()[1]);
    assert!(matches!(table.record("2.5"), Err(Error::UnknownRow(_))));
    assert!(matches!(table.record("status:single"), Err(Error::UnknownRow(_))));
}

#[test]
fn test_reset_data() {
    let mut table = generated(95);
    let original = table.data().to_vec();
    table.update_my_data(21, "age", 99).unwrap();
    assert_ne!(table.data(), original.as_slice());

    table.reset_data().unwrap();
    assert_eq!(table.data(), original.as_slice());
    assert_eq!(table.state().page_index, 2);
}

#[test]
fn test_reset_state() {
    let mut table = generated(95);
    table.dispatch(sort("age")).unwrap();
    table.dispatch(Action::ResetState).unwrap();
    assert_eq!(table.state().page_index, 2);
    assert!(table.state().sort_by.is_empty());
}

// =============================================================================
// Grouping and expansion
// =============================================================================

#[test]
fn test_two_stage_aggregation() {
    let mut table = small();
    table.dispatch(group("status")).unwrap();
    table.dispatch(group("lastName")).unwrap();

    assert_eq!(visible_ids(&table), vec!["status:single", "status:complicated"]);
    let single = table.view().find("status:single").unwrap();
    assert_eq!(single.value("firstName"), &Value::Int(3));
    assert_eq!(single.value("visits"), &Value::Int(120));

    let doe = table.view().find("status:single>lastName:doe").unwrap();
    assert_eq!(doe.value("firstName"), &Value::Int(2));
    assert_eq!(doe.value("age"), &Value::Int(20));
}

#[test]
fn test_expansion_flattens_children() {
    let mut table = small();
    table.dispatch(group("status")).unwrap();
    table.dispatch(group("lastName")).unwrap();

    table.dispatch(expand("status:single")).unwrap();
    assert_eq!(
        visible_ids(&table),
        vec![
            "status:single",
            "status:single>lastName:doe",
            "status:single>lastName:roe",
            "status:complicated",
        ]
    );

    table.dispatch(expand("status:single>lastName:doe")).unwrap();
    assert_eq!(table.view().expanded_len(), 6);

    table.dispatch(expand("status:single")).unwrap();
    assert_eq!(table.view().expanded_len(), 2);
    assert!(matches!(table.dispatch(expand("nope")), Err(Error::UnknownRow(_))));
}

#[test]
fn test_ungroup_restores_rows() {
    let mut table = small();
    table.dispatch(group("status")).unwrap();
    table.dispatch(group("status")).unwrap();
    assert!(table.state().group_by.is_empty());
    assert_eq!(page_ids(&table), vec!["0", "1", "2", "3"]);
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_select_all_ignores_filters() {
    let mut table = generated(95);
    table
        .dispatch(Action::SetFilter {
            column_id: "status".into(),
            value: Some(FilterValue::from("single")),
        })
        .unwrap();
    table.dispatch(Action::ToggleAllRowsSelected { selected: None }).unwrap();
    assert_eq!(table.state().selected_rows.len(), 95);
    assert!(table.is_all_selected());

    table.dispatch(Action::ToggleAllRowsSelected { selected: None }).unwrap();
    assert!(table.state().selected_rows.is_empty());
}

#[test]
fn test_group_row_selection() {
    let mut table = small();
    table.dispatch(group("status")).unwrap();
    table
        .dispatch(Action::ToggleRowSelected {
            row_id: "status:single".into(),
            selected: Some(true),
        })
        .unwrap();
    let selected: Vec<_> = table.state().selected_rows.iter().map(String::as_str).collect();
    assert_eq!(selected, vec!["0", "1", "2"]);

    table
        .dispatch(Action::ToggleRowSelected {
            row_id: "1".into(),
            selected: Some(false),
        })
        .unwrap();
    let single = table.view().find("status:single").unwrap();
    assert!(!table.is_selected(single));
}

#[test]
fn test_snapshot_json() {
    let table = generated(30);
    let json = table.snapshot().to_json();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["pageIndex"], 2);
    assert_eq!(parsed["pageCount"], 3);
    assert_eq!(parsed["canNextPage"], false);
    assert_eq!(parsed["canPreviousPage"], true);
}
