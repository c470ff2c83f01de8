//! Built-in, named and custom comparators applied through a table.

use std::cmp::Ordering;

use tabular_lib::column::ColumnDef;
use tabular_lib::error::{ConfigurationError, TableError};
use tabular_lib::model::{Record, Value};
use tabular_lib::sort::{Comparator, ComparatorRegistry, CustomComparator, SortState};
use tabular_lib::{Table, TableOptions};

fn sorted(table: &Table<Record>, records: &[Record], sort: SortState, column: &str) -> Vec<String> {
    table
        .row_model(records, &sort)
        .unwrap()
        .iter()
        .map(|row| row.value(column).map(Value::to_string).unwrap_or_default())
        .collect()
}

fn records(field: &str, values: &[&str]) -> Vec<Record> {
    values.iter().map(|v| Record::new().set(field, *v)).collect()
}

#[test]
fn test_fixed_enum_order() {
    let table = Table::new(vec![
        ColumnDef::key("status")
            .with_comparator(Comparator::fixed_order(["Active", "Pending", "Inactive"])),
    ])
    .unwrap();
    let records = records("status", &["Inactive", "Active", "Pending"]);
    assert_eq!(
        sorted(&table, &records, SortState::asc("status"), "status"),
        ["Active", "Pending", "Inactive"]
    );
}

#[test]
fn test_unlisted_enum_values_sort_after_listed() {
    let table = Table::new(vec![
        ColumnDef::key("status").with_comparator(Comparator::fixed_order(["Active", "Pending"])),
    ])
    .unwrap();
    let records = records("status", &["Banned", "Pending", "Archived", "Active"]);
    assert_eq!(
        sorted(&table, &records, SortState::asc("status"), "status"),
        ["Active", "Pending", "Banned", "Archived"]
    );
}

#[test]
fn test_fixed_order_of_integers_matches_json_numbers() {
    let table = Table::new(vec![
        ColumnDef::key("priority").with_comparator(Comparator::fixed_order([3i64, 1i64, 2i64])),
    ])
    .unwrap();
    let records: Vec<Record> = [1, 2, 3]
        .iter()
        .map(|p| Record::from_json(serde_json::json!({ "priority": p })).unwrap())
        .collect();
    assert_eq!(
        sorted(&table, &records, SortState::asc("priority"), "priority"),
        ["3", "1", "2"]
    );
}

#[test]
fn test_accented_names_sort_with_their_base_letter() {
    let table = Table::new(vec![ColumnDef::key("name")]).unwrap();
    let records = records("name", &["Zoe", "Émily", "Frank", "Ava"]);
    assert_eq!(
        sorted(&table, &records, SortState::asc("name"), "name"),
        ["Ava", "Émily", "Frank", "Zoe"]
    );
    assert_eq!(
        sorted(&table, &records, SortState::desc("name"), "name"),
        ["Zoe", "Frank", "Émily", "Ava"]
    );
}

#[test]
fn test_nested_zip_code() {
    let table = Table::new(vec![
        ColumnDef::key("address")
            .with_id("zipCode")
            .with_comparator(Comparator::nested("zipCode")),
        ColumnDef::key("address.zipCode").with_id("zip"),
    ])
    .unwrap();
    let records: Vec<Record> = ["94107", "10001", "78701"]
        .iter()
        .map(|zip| Record::new().set("address", Record::new().set("zipCode", *zip)))
        .collect();
    assert_eq!(
        sorted(&table, &records, SortState::asc("zipCode"), "zip"),
        ["10001", "78701", "94107"]
    );
}

#[test]
fn test_text_is_case_insensitive() {
    let table = Table::new(vec![
        ColumnDef::key("name").with_comparator(Comparator::named("text")),
        ColumnDef::key("name")
            .with_id("exact")
            .with_comparator(Comparator::named("textCaseSensitive")),
    ])
    .unwrap();
    let records = records("name", &["banana", "Cherry", "apple"]);
    assert_eq!(
        sorted(&table, &records, SortState::asc("name"), "name"),
        ["apple", "banana", "Cherry"]
    );
    assert_eq!(
        sorted(&table, &records, SortState::asc("exact"), "name"),
        ["Cherry", "apple", "banana"]
    );
}

#[test]
fn test_alphanumeric_orders_digit_runs() {
    let table = Table::new(vec![
        ColumnDef::key("file").with_comparator(Comparator::named("alphanumeric")),
    ])
    .unwrap();
    let records = records("file", &["item10", "item2", "Item1", "item"]);
    assert_eq!(
        sorted(&table, &records, SortState::asc("file"), "file"),
        ["item", "Item1", "item2", "item10"]
    );
}

#[test]
fn test_registered_custom_comparator() {
    let by_length = CustomComparator::new(|a: &Value, b: &Value| {
        let len = |v: &Value| v.as_str().map(str::len).unwrap_or(0);
        len(a).cmp(&len(b))
    });
    let registry = ComparatorRegistry::new().register("byLength", by_length);
    let table = Table::with_options(
        vec![ColumnDef::key("word").with_comparator(Comparator::named("byLength"))],
        TableOptions::default(),
        registry,
    )
    .unwrap();
    let records = records("word", &["ccc", "a", "bb", "d"]);
    assert_eq!(
        sorted(&table, &records, SortState::asc("word"), "word"),
        ["a", "d", "bb", "ccc"]
    );
    assert_eq!(
        sorted(&table, &records, SortState::desc("word"), "word"),
        ["ccc", "bb", "a", "d"]
    );
}

#[test]
fn test_unregistered_name_fails_at_construction() {
    let result = Table::<Record>::new(vec![
        ColumnDef::key("word").with_comparator(Comparator::named("byLength")),
    ]);
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::unknown_comparator("word", "byLength")
    );
}

#[test]
fn test_panicking_comparator_is_a_fault() {
    let table = Table::new(vec![ColumnDef::key("n").with_comparator(Comparator::custom(
        |a: &Value, b: &Value| -> Ordering {
            if a.is_null() || b.is_null() {
                panic!("null reached the comparator");
            }
            tabular_lib::sort::natural_cmp(a, b)
        },
    ))])
    .unwrap();
    let records = vec![Record::new().set("n", 2), Record::new().set("n", 1)];
    let model = table.row_model(&records, &SortState::asc("n")).unwrap();
    assert_eq!(model.rows()[0].index(), 1);

    let with_gap = vec![Record::new().set("n", 2), Record::new(), Record::new().set("n", 1)];
    assert!(table.row_model(&with_gap, &SortState::asc("n")).is_ok());

    let table = Table::with_options(
        table.columns().iter().cloned().collect(),
        TableOptions::default().with_no_value(tabular_lib::NoValuePolicy::Compare),
        ComparatorRegistry::new(),
    )
    .unwrap();
    let err = table.row_model(&with_gap, &SortState::asc("n")).unwrap_err();
    assert!(err.is_comparator());
    match err {
        TableError::Comparator(fault) => assert!(fault.message.contains("null reached")),
        other => panic!("unexpected error: {:?}", other),
    }
}
