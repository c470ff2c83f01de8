//! The row model: records resolved and ordered for display.
//!
//! # Overview
//!
//! - [`build`] - builds with default options and built-in comparators
//! - [`RowModelBuilder`] - builds with a table's options, registry and row ids
//! - [`RowModel`] - the ordered rows plus any accessor faults

mod builder;
mod row;
mod sort;

pub use builder::*;
pub use row::*;

use serde::Serialize;
use serde::ser::SerializeSeq;

use crate::column::ColumnSet;
use crate::error::AccessorFault;
use crate::error::TableError;
use crate::sort::SortState;

/// Ordered rows ready for display.
///
/// Always a permutation of the input records. Rebuilt from scratch whenever
/// the records or the sort change.
pub struct RowModel<'a, R> {
    rows: Vec<Row<'a, R>>,
    faults: Vec<AccessorFault>,
}

impl<'a, R> RowModel<'a, R> {
    pub(crate) fn new(rows: Vec<Row<'a, R>>, faults: Vec<AccessorFault>) -> Self {
        Self { rows, faults }
    }

    /// The rows, in display order.
    pub fn rows(&self) -> &[Row<'a, R>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row<'a, R>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row<'a, R>> {
        self.rows.iter()
    }

    /// Finds a row by its id.
    pub fn row_by_id(&self, id: &str) -> Option<&Row<'a, R>> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Accessor failures met while resolving cells, in input order.
    pub fn faults(&self) -> &[AccessorFault] {
        &self.faults
    }
}

impl<R> std::fmt::Debug for RowModel<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowModel")
            .field("rows", &self.rows)
            .field("faults", &self.faults)
            .finish()
    }
}

impl<R> Clone for RowModel<'_, R> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            faults: self.faults.clone(),
        }
    }
}

impl<'m, 'a, R> IntoIterator for &'m RowModel<'a, R> {
    type Item = &'m Row<'a, R>;
    type IntoIter = std::slice::Iter<'m, Row<'a, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Serializes as the array of rows.
impl<R> Serialize for RowModel<'_, R> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

/// Builds a row model with default options and built-in comparators.
///
/// # Example
///
/// ```
/// use tabular_lib::column::{ColumnDef, ColumnSet};
/// use tabular_lib::model::{Record, Value};
/// use tabular_lib::row_model;
/// use tabular_lib::sort::SortState;
///
/// let records = vec![
///     Record::new().set("x", 5),
///     Record::new(),
///     Record::new().set("x", 1),
/// ];
/// let columns = ColumnSet::new(vec![ColumnDef::key("x")]).unwrap();
///
/// let model = row_model::build(&records, &columns, &SortState::asc("x")).unwrap();
/// let xs: Vec<_> = model.iter().map(|row| row.value("x").cloned()).collect();
/// assert_eq!(xs, [Some(Value::Int(1)), Some(Value::Int(5)), Some(Value::Null)]);
/// ```
pub fn build<'a, R>(
    records: &'a [R],
    columns: &ColumnSet<R>,
    sort: &SortState,
) -> Result<RowModel<'a, R>, TableError> {
    RowModelBuilder::new(columns).build(records, sort)
}
