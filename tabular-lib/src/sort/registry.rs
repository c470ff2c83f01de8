//! Comparator registry.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::Comparator;
use super::CustomComparator;
use crate::column::ColumnDef;
use crate::error::ComparatorFault;
use crate::error::ConfigurationError;
use crate::model::Value;

/// Named comparators available to columns.
///
/// The built-in comparators are always available under their names (see
/// [`Comparator::BUILTIN_NAMES`]). Callers add their own with
/// [`register`](Self::register); a registered name shadows a built-in one.
///
/// The registry never decides *which* comparator a column uses: the column
/// declares it, and [`comparator_for`](Self::comparator_for) only resolves
/// names and falls back to [`Comparator::Natural`].
///
/// # Example
///
/// ```
/// use tabular_lib::sort::{Comparator, ComparatorRegistry, CustomComparator};
///
/// let registry = ComparatorRegistry::new()
///     .register("byLength", CustomComparator::new(|a, b| {
///         a.to_string().len().cmp(&b.to_string().len())
///     }));
///
/// assert!(registry.contains("byLength"));
/// assert!(registry.contains("datetime"));
/// assert!(!registry.contains("fuzzy"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComparatorRegistry {
    custom: HashMap<String, CustomComparator>,
}

impl ComparatorRegistry {
    /// Creates a registry holding only the built-in comparators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom comparator (builder pattern).
    pub fn register(mut self, name: impl Into<String>, comparator: CustomComparator) -> Self {
        self.insert(name, comparator);
        self
    }

    /// Registers a custom comparator.
    pub fn insert(&mut self, name: impl Into<String>, comparator: CustomComparator) {
        self.custom.insert(name.into(), comparator);
    }

    /// Returns `true` if `name` resolves to a comparator.
    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name) || Comparator::builtin(name).is_some()
    }

    /// Looks up a comparator by name.
    pub fn lookup(&self, name: &str) -> Option<Comparator> {
        match self.custom.get(name) {
            Some(custom) => Some(Comparator::Custom(custom.clone())),
            None => Comparator::builtin(name),
        }
    }

    /// Checks that every name `comparator` refers to is registered.
    pub fn validate(&self, column_id: &str, comparator: &Comparator) -> Result<(), ConfigurationError> {
        let mut names = Vec::new();
        comparator.named_dependencies(&mut names);
        match names.into_iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(ConfigurationError::unknown_comparator(column_id, missing)),
            None => Ok(()),
        }
    }

    /// Replaces every named reference in `comparator` with the comparator it
    /// names.
    pub fn resolve(
        &self,
        column_id: &str,
        comparator: &Comparator,
    ) -> Result<Comparator, ConfigurationError> {
        match comparator {
            Comparator::Named(name) => self
                .lookup(name)
                .ok_or_else(|| ConfigurationError::unknown_comparator(column_id, name)),
            Comparator::Nested { path, by } => Ok(Comparator::Nested {
                path: path.clone(),
                by: Box::new(self.resolve(column_id, by)?),
            }),
            other => Ok(other.clone()),
        }
    }

    /// Returns the comparator `column` declared, defaulting to natural order.
    pub fn comparator_for<R>(
        &self,
        column: &ColumnDef<R>,
    ) -> Result<ColumnComparator<'_>, ConfigurationError> {
        let comparator = match column.comparator() {
            Some(declared) => self.resolve(column.id(), declared)?,
            None => Comparator::Natural,
        };
        Ok(ColumnComparator {
            column: column.id().to_string(),
            comparator,
            registry: self,
        })
    }
}

/// A comparator bound to one column, with names already resolved.
#[derive(Debug, Clone)]
pub struct ColumnComparator<'a> {
    column: String,
    comparator: Comparator,
    registry: &'a ComparatorRegistry,
}

impl ColumnComparator<'_> {
    /// The column this comparator orders.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The resolved comparator.
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Compares two values of this column.
    pub fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ComparatorFault> {
        self.comparator
            .compare(a, b, self.registry)
            .map_err(|message| ComparatorFault::new(&self.column, message))
    }
}
