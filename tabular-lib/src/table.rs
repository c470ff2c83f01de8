//! Table: columns plus options, the entry point of the engine.

use std::fmt;
use std::sync::Arc;

use crate::TableOptions;
use crate::column::ColumnDef;
use crate::column::ColumnSet;
use crate::error::ConfigurationError;
use crate::error::TableError;
use crate::row_model::RowIdFn;
use crate::row_model::RowModel;
use crate::row_model::RowModelBuilder;
use crate::sort::ComparatorRegistry;
use crate::sort::SortController;
use crate::sort::SortRules;
use crate::sort::SortState;
use crate::sort::next_sort_state;

/// A configured table over records of type `R`.
///
/// Holds no records and no sort state: both are supplied per call, so one
/// table can be shared across threads and rendered many times.
///
/// # Example
///
/// ```
/// use tabular_lib::Table;
/// use tabular_lib::column::ColumnDef;
/// use tabular_lib::model::Record;
/// use tabular_lib::sort::{Comparator, SortState};
///
/// let table: Table<Record> = Table::new(vec![
///     ColumnDef::key("name"),
///     ColumnDef::key("status")
///         .with_comparator(Comparator::fixed_order(["Active", "Pending", "Inactive"])),
/// ])
/// .unwrap();
///
/// let records = vec![
///     Record::new().set("name", "John").set("status", "Inactive"),
///     Record::new().set("name", "Tanner").set("status", "Active"),
///     Record::new().set("name", "Jane").set("status", "Pending"),
/// ];
///
/// let sort = table.toggle_sort(&SortState::unsorted(), "status", false).unwrap();
/// let model = table.row_model(&records, &sort).unwrap();
/// let names: Vec<_> = model.iter().map(|row| row.value("name").unwrap().to_string()).collect();
/// assert_eq!(names, ["Tanner", "Jane", "John"]);
/// ```
pub struct Table<R> {
    columns: ColumnSet<R>,
    options: TableOptions,
    registry: ComparatorRegistry,
    row_id: Option<Arc<RowIdFn<R>>>,
}

impl<R> Table<R> {
    /// Creates a table with default options and built-in comparators.
    pub fn new(columns: Vec<ColumnDef<R>>) -> Result<Self, ConfigurationError> {
        Self::with_options(columns, TableOptions::default(), ComparatorRegistry::new())
    }

    /// Creates a table with explicit options and comparators.
    ///
    /// Fails on duplicate column ids and on comparator names `registry`
    /// does not know.
    pub fn with_options(
        columns: Vec<ColumnDef<R>>,
        options: TableOptions,
        registry: ComparatorRegistry,
    ) -> Result<Self, ConfigurationError> {
        let columns = ColumnSet::new(columns)?;
        for column in &columns {
            if let Some(comparator) = column.comparator() {
                registry.validate(column.id(), comparator)?;
            }
        }
        log::debug!("Table: {} columns, options: {:?}", columns.len(), options);
        Ok(Self {
            columns,
            options,
            registry,
            row_id: None,
        })
    }

    /// Derives row ids from records instead of their index.
    pub fn row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&R, usize) -> String + Send + Sync + 'static,
    {
        self.row_id = Some(Arc::new(f));
        self
    }

    pub fn columns(&self) -> &ColumnSet<R> {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn registry(&self) -> &ComparatorRegistry {
        &self.registry
    }

    /// The toggle rules derived from the columns and options.
    pub fn sort_rules(&self) -> SortRules {
        SortRules::new(&self.columns, &self.options)
    }

    /// Creates a controller that owns this table's sort state.
    pub fn sort_controller(&self) -> SortController {
        SortController::new(self.sort_rules())
    }

    /// Computes the state after a header click, without a controller.
    pub fn toggle_sort(
        &self,
        current: &SortState,
        column_id: &str,
        multi: bool,
    ) -> Result<SortState, ConfigurationError> {
        next_sort_state(current, column_id, &self.sort_rules(), multi)
    }

    /// Builds the ordered rows for `records` under `sort`.
    pub fn row_model<'a>(
        &self,
        records: &'a [R],
        sort: &SortState,
    ) -> Result<RowModel<'a, R>, TableError> {
        let builder = RowModelBuilder::new(&self.columns)
            .registry(&self.registry)
            .options(&self.options);
        match &self.row_id {
            Some(row_id) => builder.row_id(row_id.as_ref()).build(records, sort),
            None => builder.build(records, sort),
        }
    }
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            options: self.options.clone(),
            registry: self.registry.clone(),
            row_id: self.row_id.clone(),
        }
    }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("row_id", &self.row_id.as_ref().map(|_| ".."))
            .finish()
    }
}
