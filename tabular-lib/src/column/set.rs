//! Ordered, id-indexed column collections.

use std::collections::HashMap;
use std::fmt;

use super::ColumnDef;
use crate::error::ConfigurationError;

/// The columns of a table, in display order.
///
/// Ids are unique; building a set with a repeated id fails.
pub struct ColumnSet<R> {
    columns: Vec<ColumnDef<R>>,
    index: HashMap<String, usize>,
}

impl<R> ColumnSet<R> {
    /// Builds the set, rejecting duplicate ids.
    pub fn new(columns: Vec<ColumnDef<R>>) -> Result<Self, ConfigurationError> {
        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.id().to_string(), position).is_some() {
                return Err(ConfigurationError::duplicate_column(column.id()));
            }
        }
        Ok(Self { columns, index })
    }

    /// Returns the column with the given id.
    pub fn get(&self, id: &str) -> Option<&ColumnDef<R>> {
        self.index.get(id).map(|&i| &self.columns[i])
    }

    /// Returns the display position of a column.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDef<R>> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id())
    }
}

impl<R> Clone for ColumnSet<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}

impl<'a, R> IntoIterator for &'a ColumnSet<R> {
    type Item = &'a ColumnDef<R>;
    type IntoIter = std::slice::Iter<'a, ColumnDef<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
