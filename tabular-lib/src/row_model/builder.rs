//! Builds row models.

use std::cmp::Ordering;
use std::sync::Arc;

use super::Row;
use super::RowModel;
use super::sort::stable_sort_by;
use crate::NoValuePolicy;
use crate::TableOptions;
use crate::column::ColumnSet;
use crate::error::AccessorFault;
use crate::error::ComparatorFault;
use crate::error::ConfigurationError;
use crate::error::TableError;
use crate::model::Value;
use crate::sort::ColumnComparator;
use crate::sort::ComparatorRegistry;
use crate::sort::Direction;
use crate::sort::SortState;

/// Signature of a row id function: `(record, index) -> id`.
pub type RowIdFn<R> = dyn Fn(&R, usize) -> String + Send + Sync;

/// Materializes ordered rows from records, columns and a sort state.
///
/// Borrowing everything it needs, a builder is cheap to create per build.
/// [`Table::row_model`](crate::Table::row_model) creates one from the
/// table's configuration.
pub struct RowModelBuilder<'t, R> {
    columns: &'t ColumnSet<R>,
    registry: Option<&'t ComparatorRegistry>,
    options: Option<&'t TableOptions>,
    row_id: Option<&'t RowIdFn<R>>,
}

/// One resolved entry of the sort.
struct SortKey<'r> {
    position: usize,
    comparator: ColumnComparator<'r>,
    direction: Direction,
    invert: bool,
    no_value: NoValuePolicy,
}

impl<'t, R> RowModelBuilder<'t, R> {
    /// Creates a builder with default options and built-in comparators.
    pub fn new(columns: &'t ColumnSet<R>) -> Self {
        Self {
            columns,
            registry: None,
            options: None,
            row_id: None,
        }
    }

    /// Uses `registry` to resolve named comparators.
    pub fn registry(mut self, registry: &'t ComparatorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Uses `options` instead of the defaults.
    pub fn options(mut self, options: &'t TableOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Derives row ids with `row_id` instead of the record index.
    pub fn row_id(mut self, row_id: &'t RowIdFn<R>) -> Self {
        self.row_id = Some(row_id);
        self
    }

    /// Builds the row model.
    ///
    /// Every cell is resolved once. A failing accessor yields
    /// [`Value::Null`] and an [`AccessorFault`] on the result. Entries of
    /// `sort` that name unknown columns fail the build; entries for
    /// columns with sorting disabled are skipped.
    pub fn build<'a>(
        &self,
        records: &'a [R],
        sort: &SortState,
    ) -> Result<RowModel<'a, R>, TableError> {
        let default_registry;
        let registry = match self.registry {
            Some(registry) => registry,
            None => {
                default_registry = ComparatorRegistry::new();
                &default_registry
            }
        };
        let default_options;
        let options = match self.options {
            Some(options) => options,
            None => {
                default_options = TableOptions::default();
                &default_options
            }
        };

        let keys = if options.manual_sorting {
            Vec::new()
        } else {
            self.sort_keys(sort, registry, options)?
        };

        let ids: Arc<[String]> = self.columns.ids().map(str::to_string).collect();
        let mut faults = Vec::new();
        let mut rows: Vec<Row<'a, R>> = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let values = self
                    .columns
                    .iter()
                    .map(|column| match column.resolve(record) {
                        Ok(value) => value,
                        Err(message) => {
                            let fault = AccessorFault::new(column.id(), index, message);
                            log::warn!("{}", fault);
                            faults.push(fault);
                            Value::Null
                        }
                    })
                    .collect();
                let id = match self.row_id {
                    Some(row_id) => row_id(record, index),
                    None => index.to_string(),
                };
                Row::new(id, index, record, values, Arc::clone(&ids))
            })
            .collect();

        if !keys.is_empty() {
            let mut order: Vec<usize> = (0..rows.len()).collect();
            let sorted = stable_sort_by(&mut order, |&a, &b| {
                compare_rows(&keys, rows[a].values(), rows[b].values())
            });
            if let Err(fault) = sorted {
                log::debug!("RowModelBuilder: {}", fault);
                return Err(fault.into());
            }
            let mut slots: Vec<Option<Row<'a, R>>> = rows.into_iter().map(Some).collect();
            rows = order.into_iter().filter_map(|i| slots[i].take()).collect();
        }

        log::debug!(
            "RowModelBuilder: built {} rows x {} columns, sort: {:?}",
            rows.len(),
            ids.len(),
            sort.entries()
        );
        Ok(RowModel::new(rows, faults))
    }

    fn sort_keys<'r>(
        &self,
        sort: &SortState,
        registry: &'r ComparatorRegistry,
        options: &TableOptions,
    ) -> Result<Vec<SortKey<'r>>, ConfigurationError> {
        let mut keys = Vec::with_capacity(sort.len());
        for entry in sort.entries() {
            let (position, column) = self
                .columns
                .position(&entry.id)
                .zip(self.columns.get(&entry.id))
                .ok_or_else(|| ConfigurationError::unknown_column(&entry.id))?;
            if !options.enable_sorting || column.sorting_enabled() == Some(false) {
                log::debug!("RowModelBuilder: column '{}' cannot be sorted, skipped", entry.id);
                continue;
            }
            keys.push(SortKey {
                position,
                comparator: registry.comparator_for(column)?,
                direction: entry.direction(),
                invert: column.inverts_sorting(),
                no_value: column.no_value().unwrap_or(options.no_value),
            });
        }
        Ok(keys)
    }
}

/// Compares two rows on every sort key in turn.
fn compare_rows(
    keys: &[SortKey<'_>],
    a: &[Value],
    b: &[Value],
) -> Result<Ordering, ComparatorFault> {
    for key in keys {
        let (x, y) = (&a[key.position], &b[key.position]);
        let ordering = match key
            .no_value
            .order(x.is_null(), y.is_null(), key.direction, key.invert)
        {
            Some(ordering) => ordering,
            None => {
                let ordering = key.direction.apply(key.comparator.compare(x, y)?);
                if key.invert { ordering.reverse() } else { ordering }
            }
        };
        if ordering != Ordering::Equal {
            return Ok(ordering);
        }
    }
    Ok(Ordering::Equal)
}
