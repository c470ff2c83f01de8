//! Rows of a row model.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::ser::SerializeMap;
use serde::ser::SerializeStruct;

use crate::model::Value;

/// One displayed row: a record plus its resolved cell values.
///
/// Borrows the record it was built from; the row model never clones
/// caller data.
pub struct Row<'a, R> {
    id: String,
    index: usize,
    original: &'a R,
    values: Vec<Value>,
    columns: Arc<[String]>,
}

impl<'a, R> Row<'a, R> {
    pub(crate) fn new(
        id: String,
        index: usize,
        original: &'a R,
        values: Vec<Value>,
        columns: Arc<[String]>,
    ) -> Self {
        Self {
            id,
            index,
            original,
            values,
            columns,
        }
    }

    /// The row's stable id (the record index unless the table supplies a
    /// row id function).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position of the record in the input sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The record this row was built from.
    pub fn original(&self) -> &'a R {
        self.original
    }

    /// Returns the resolved value of a column.
    pub fn value(&self, column_id: &str) -> Option<&Value> {
        let position = self.columns.iter().position(|c| c == column_id)?;
        self.values.get(position)
    }

    /// Resolved values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates `(column id, value)` pairs in column order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> {
        self.columns
            .iter()
            .zip(&self.values)
            .map(|(column, value)| Cell {
                column: column.as_str(),
                value,
            })
    }
}

/// A single cell of a [`Row`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell<'r> {
    pub column: &'r str,
    pub value: &'r Value,
}

impl<R> fmt::Debug for Row<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl<R> Clone for Row<'_, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            index: self.index,
            original: self.original,
            values: self.values.clone(),
            columns: Arc::clone(&self.columns),
        }
    }
}

struct CellMap<'r, 'a, R>(&'r Row<'a, R>);

impl<R> Serialize for CellMap<'_, '_, R> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.values.len()))?;
        for cell in self.0.cells() {
            map.serialize_entry(cell.column, cell.value)?;
        }
        map.end()
    }
}

/// Serializes as `{"id": .., "index": .., "values": {column: value}}`.
/// The original record is left out.
impl<R> Serialize for Row<'_, R> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("Row", 3)?;
        row.serialize_field("id", &self.id)?;
        row.serialize_field("index", &self.index)?;
        row.serialize_field("values", &CellMap(self))?;
        row.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(record: &()) -> Row<'_, ()> {
        let columns: Arc<[String]> = vec!["name".to_string(), "age".to_string()].into();
        Row::new(
            "7".into(),
            7,
            record,
            vec![Value::from("Jane"), Value::Int(25)],
            columns,
        )
    }

    #[test]
    fn test_value_by_column() {
        let row = row(&());
        assert_eq!(row.value("age"), Some(&Value::Int(25)));
        assert_eq!(row.value("zip"), None);
        assert_eq!(row.cells().map(|c| c.column).collect::<Vec<_>>(), ["name", "age"]);
    }

    #[test]
    fn test_serialize() {
        let row = row(&());
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"id": "7", "index": 7, "values": {"name": "Jane", "age": 25}})
        );
    }
}
