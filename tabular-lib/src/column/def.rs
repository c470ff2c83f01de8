//! Column definitions.

use std::fmt;

use super::Accessor;
use super::FieldLookup;
use crate::NoValuePolicy;
use crate::model::Value;
use crate::sort::Comparator;

/// A table column: how to read its value and how to order it.
///
/// A flat record of optional settings; anything left unset falls back to
/// the table's [`TableOptions`](crate::TableOptions). `header` and `meta`
/// are carried for the presentation layer and never read by the engine.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabular_lib::column::ColumnDef;
/// use tabular_lib::model::{Record, Value};
/// use tabular_lib::sort::Comparator;
///
/// let columns: Vec<ColumnDef<Record>> = vec![
///     ColumnDef::new("fullName", |r: &Record| {
///         let first = r.get_path("fullName.firstName").cloned().unwrap_or_default();
///         let last = r.get_path("fullName.lastName").cloned().unwrap_or_default();
///         Value::from(format!("{} {}", first, last))
///     })
///     .with_header("Full Name"),
///     ColumnDef::key("age")
///         .with_header("Age")
///         .with_meta(json!({"isNumeric": true})),
///     ColumnDef::key("status")
///         .with_comparator(Comparator::fixed_order(["Active", "Pending", "Inactive"])),
///     ColumnDef::key("address")
///         .with_id("zipCode")
///         .with_comparator(Comparator::nested("zipCode")),
/// ];
/// assert_eq!(columns[3].id(), "zipCode");
/// ```
pub struct ColumnDef<R> {
    id: String,
    header: Option<String>,
    accessor: Accessor<R>,
    comparator: Option<Comparator>,
    meta: serde_json::Value,
    enable_sorting: Option<bool>,
    sort_desc_first: Option<bool>,
    invert_sorting: bool,
    no_value: Option<NoValuePolicy>,
}

impl<R> ColumnDef<R> {
    /// Creates a column with a derived accessor.
    ///
    /// A panicking accessor does not abort the row model, but the panic hook
    /// still prints a report to stderr for every failing record. Use
    /// [`ColumnDef::try_new`] when the accessor can fail on bad data.
    pub fn new<F>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self::from_accessor(id, Accessor::derived(accessor))
    }

    /// Creates a column whose accessor may fail.
    ///
    /// A failing accessor does not abort the row model; the cell resolves
    /// to [`Value::Null`] and the failure is reported as an
    /// [`AccessorFault`](crate::error::AccessorFault).
    pub fn try_new<F, E>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Result<Value, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self::from_accessor(id, Accessor::fallible(accessor))
    }

    /// Creates a column from an existing accessor.
    pub fn from_accessor(id: impl Into<String>, accessor: Accessor<R>) -> Self {
        Self {
            id: id.into(),
            header: None,
            accessor,
            comparator: None,
            meta: serde_json::Value::Null,
            enable_sorting: None,
            sort_desc_first: None,
            invert_sorting: false,
            no_value: None,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Overrides the column id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the header text.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Declares the column's comparator.
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Attaches opaque caller data.
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = meta;
        self
    }

    /// Allows or forbids toggling sort on this column.
    pub fn with_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = Some(enabled);
        self
    }

    /// Makes this column start descending.
    pub fn with_sort_desc_first(mut self, desc_first: bool) -> Self {
        self.sort_desc_first = Some(desc_first);
        self
    }

    /// Flips the comparator, for rankings where smaller is better.
    pub fn with_invert_sorting(mut self, invert: bool) -> Self {
        self.invert_sorting = invert;
        self
    }

    /// Sets where missing values go for this column.
    pub fn with_no_value(mut self, policy: NoValuePolicy) -> Self {
        self.no_value = Some(policy);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the header text, if set.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Returns the accessor.
    pub fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }

    /// Returns the declared comparator, if any.
    pub fn comparator(&self) -> Option<&Comparator> {
        self.comparator.as_ref()
    }

    /// Returns the caller data.
    pub fn meta(&self) -> &serde_json::Value {
        &self.meta
    }

    /// Returns the per-column sorting switch, if set.
    pub fn sorting_enabled(&self) -> Option<bool> {
        self.enable_sorting
    }

    /// Returns the per-column desc-first setting, if set.
    pub fn desc_first(&self) -> Option<bool> {
        self.sort_desc_first
    }

    /// Returns `true` if the comparator is flipped.
    pub fn inverts_sorting(&self) -> bool {
        self.invert_sorting
    }

    /// Returns the per-column no-value policy, if set.
    pub fn no_value(&self) -> Option<NoValuePolicy> {
        self.no_value
    }

    /// Evaluates the accessor on a record.
    pub fn resolve(&self, record: &R) -> Result<Value, String> {
        self.accessor.resolve(record)
    }
}

impl<R: FieldLookup> ColumnDef<R> {
    /// Creates a column that reads a field path; the path is also the id.
    pub fn key(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::from_accessor(path.clone(), Accessor::path_of(path))
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            comparator: self.comparator.clone(),
            meta: self.meta.clone(),
            enable_sorting: self.enable_sorting,
            sort_desc_first: self.sort_desc_first,
            invert_sorting: self.invert_sorting,
            no_value: self.no_value,
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("comparator", &self.comparator)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_try_new_reports_errors_as_values() {
        let column = ColumnDef::try_new("age", |r: &Record| match r.get("age") {
            Some(age) => Ok(age.clone()),
            None => Err("age is missing"),
        });
        assert_eq!(column.resolve(&Record::new().set("age", 40)), Ok(Value::Int(40)));
        assert_eq!(column.resolve(&Record::new()), Err("age is missing".to_string()));
        assert_eq!(column.accessor().path(), None);
    }

    #[test]
    fn test_new_catches_panics() {
        let column = ColumnDef::new("boom", |_: &Record| -> Value { panic!("bad record") });
        let err = column.resolve(&Record::new()).unwrap_err();
        assert!(err.starts_with("panicked: "));
        assert!(err.contains("bad record"));
    }
}
