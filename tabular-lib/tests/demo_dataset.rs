//! The five-person dataset, sorted the way a user would click through it.

use serde_json::json;
use simplelog::{Config, LevelFilter, TestLogger};
use tabular_lib::Table;
use tabular_lib::column::ColumnDef;
use tabular_lib::model::{Record, Value};
use tabular_lib::sort::{Comparator, SortState, SortStatus};

fn people() -> Vec<Record> {
    serde_json::from_str(include_str!("fixtures/people.json")).unwrap()
}

fn table() -> Table<Record> {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
    Table::new(vec![
        ColumnDef::new("fullName", |person: &Record| {
            let first = person.get_path("fullName.firstName").cloned().unwrap_or_default();
            let last = person.get_path("fullName.lastName").cloned().unwrap_or_default();
            Value::from(format!("{} {}", first, last))
        })
        .with_header("Full Name")
        .with_comparator(Comparator::named("basic")),
        ColumnDef::key("age")
            .with_header("Age")
            .with_meta(json!({"isNumeric": true})),
        ColumnDef::key("lastLogin")
            .with_header("Last Login")
            .with_comparator(Comparator::named("datetime")),
        ColumnDef::key("status")
            .with_header("Status")
            .with_comparator(Comparator::fixed_order(["Active", "Pending", "Inactive"])),
        ColumnDef::key("isAdmin").with_header("Admin"),
        ColumnDef::key("progress").with_header("Profile Progress"),
        ColumnDef::key("address")
            .with_id("zipCode")
            .with_header("ZipCode")
            .with_comparator(Comparator::nested("zipCode")),
    ])
    .unwrap()
}

fn first_names(table: &Table<Record>, records: &[Record], sort: &SortState) -> Vec<String> {
    table
        .row_model(records, sort)
        .unwrap()
        .iter()
        .map(|row| {
            row.original()
                .get_path("fullName.firstName")
                .map(Value::to_string)
                .unwrap_or_default()
        })
        .collect()
}

#[test]
fn test_unsorted_is_input_order() {
    let table = table();
    let people = people();
    assert_eq!(
        first_names(&table, &people, &SortState::unsorted()),
        ["Tanner", "Jane", "John", "Kevin", "Emily"]
    );
}

#[test]
fn test_full_name_derived() {
    let table = table();
    let people = people();
    let model = table.row_model(&people, &SortState::asc("fullName")).unwrap();
    let names: Vec<String> = model
        .iter()
        .map(|row| row.value("fullName").map(Value::to_string).unwrap_or_default())
        .collect();
    assert_eq!(
        names,
        ["Emily White", "Jane Doe", "John Smith", "Kevin Vandy", "Tanner Linsley"]
    );
}

#[test]
fn test_age_cycle() {
    let table = table();
    let people = people();
    let sorting = table.sort_controller();

    sorting.toggle("age").unwrap();
    assert_eq!(
        first_names(&table, &people, &sorting.current()),
        ["Jane", "Emily", "Tanner", "Kevin", "John"]
    );

    sorting.toggle("age").unwrap();
    assert_eq!(sorting.status(), SortStatus::Descending("age".into()));
    assert_eq!(
        first_names(&table, &people, &sorting.current()),
        ["John", "Kevin", "Tanner", "Emily", "Jane"]
    );

    sorting.toggle("age").unwrap();
    assert_eq!(sorting.status(), SortStatus::Unsorted);
    assert_eq!(
        first_names(&table, &people, &sorting.current()),
        ["Tanner", "Jane", "John", "Kevin", "Emily"]
    );
}

#[test]
fn test_last_login_chronological() {
    let table = table();
    let people = people();
    assert_eq!(
        first_names(&table, &people, &SortState::asc("lastLogin")),
        ["John", "Tanner", "Jane", "Emily", "Kevin"]
    );
}

#[test]
fn test_status_priority_is_stable() {
    let table = table();
    let people = people();
    assert_eq!(
        first_names(&table, &people, &SortState::asc("status")),
        ["Tanner", "Kevin", "Jane", "Emily", "John"]
    );
    // Ties keep input order in both directions.
    assert_eq!(
        first_names(&table, &people, &SortState::desc("status")),
        ["John", "Jane", "Emily", "Tanner", "Kevin"]
    );
}

#[test]
fn test_zip_code_nested() {
    let table = table();
    let people = people();
    assert_eq!(
        first_names(&table, &people, &SortState::asc("zipCode")),
        ["John", "Kevin", "Jane", "Tanner", "Emily"]
    );
}

#[test]
fn test_admin_and_progress() {
    let table = table();
    let people = people();
    assert_eq!(
        first_names(&table, &people, &SortState::desc("isAdmin")),
        ["Tanner", "Kevin", "Jane", "John", "Emily"]
    );
    assert_eq!(
        first_names(&table, &people, &SortState::desc("progress")),
        ["Emily", "John", "Tanner", "Jane", "Kevin"]
    );
}

#[test]
fn test_switching_columns_starts_ascending() {
    let table = table();
    let people = people();
    let sorting = table.sort_controller();
    sorting.toggle("age").unwrap();
    sorting.toggle("age").unwrap();
    sorting.toggle("status").unwrap();
    assert_eq!(sorting.status(), SortStatus::Ascending("status".into()));
    assert_eq!(
        first_names(&table, &people, &sorting.current()),
        ["Tanner", "Kevin", "Jane", "Emily", "John"]
    );
}

#[test]
fn test_meta_and_headers_pass_through() {
    let table = table();
    let age = table.columns().get("age").unwrap();
    assert_eq!(age.header(), Some("Age"));
    assert_eq!(age.meta()["isNumeric"], json!(true));
    assert_eq!(table.columns().get("isAdmin").unwrap().meta(), &serde_json::Value::Null);
}
