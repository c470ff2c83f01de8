//! The people table: dataset, columns and cell formatting.

use std::path::Path;

use serde_json::json;
use tabular_lib::Table;
use tabular_lib::TableOptions;
use tabular_lib::column::ColumnDef;
use tabular_lib::model::Record;
use tabular_lib::model::Value;
use tabular_lib::sort::Comparator;
use tabular_lib::sort::ComparatorRegistry;

use crate::error::CliError;

const PEOPLE: &str = include_str!("../data/people.json");

/// Loads records from `path`, or the built-in people when `None`.
pub fn load(path: Option<&Path>) -> Result<Vec<Record>, CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::Data {
                path: path.to_path_buf(),
                source,
            })
        }
        None => serde_json::from_str(PEOPLE).map_err(|source| CliError::Data {
            path: "<built-in>".into(),
            source,
        }),
    }
}

/// Builds the people table.
pub fn table(options: TableOptions) -> Result<Table<Record>, CliError> {
    let columns = vec![
        ColumnDef::new("fullName", |person: &Record| {
            let first = person.get_path("fullName.firstName").cloned().unwrap_or_default();
            let last = person.get_path("fullName.lastName").cloned().unwrap_or_default();
            Value::from(format!("{} {}", first, last).trim().to_string())
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
        ColumnDef::key("progress")
            .with_header("Profile Progress")
            .with_meta(json!({"isNumeric": true})),
        ColumnDef::key("address")
            .with_id("zipCode")
            .with_header("ZipCode")
            .with_comparator(Comparator::nested("zipCode")),
    ];
    Table::with_options(columns, options, ComparatorRegistry::new()).map_err(CliError::from)
}

/// Formats a cell for display.
pub fn format_cell(column: &str, value: &Value) -> String {
    match (column, value) {
        (_, Value::Null) => String::new(),
        ("lastLogin", Value::DateTime(at)) => at.format("%Y-%m-%d").to_string(),
        ("isAdmin", Value::Bool(admin)) => if *admin { "●" } else { "○" }.to_string(),
        ("progress", value) if value.is_number() => format!("{}%", value),
        ("zipCode", value) => value.path("zipCode").map(Value::to_string).unwrap_or_default(),
        (_, value) => value.to_string(),
    }
}
