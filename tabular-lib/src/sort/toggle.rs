//! Sort transitions that honour table and column options.

use std::collections::HashMap;

use super::ColumnSort;
use super::SortState;
use crate::TableOptions;
use crate::column::ColumnSet;
use crate::error::ConfigurationError;

/// Sorting settings for one column after applying table defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSortRules {
    /// Whether toggling this column does anything.
    pub can_sort: bool,
    /// Whether the column starts descending.
    pub desc_first: bool,
}

/// Everything a toggle needs to know about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRules {
    columns: HashMap<String, ColumnSortRules>,
    enable_sorting_removal: bool,
    enable_multi_sort: bool,
    enable_multi_remove: bool,
    max_multi_sort_columns: Option<usize>,
}

impl SortRules {
    /// Derives the rules for a column set.
    pub fn new<R>(columns: &ColumnSet<R>, options: &TableOptions) -> Self {
        let columns = columns
            .iter()
            .map(|column| {
                let rules = ColumnSortRules {
                    can_sort: options.enable_sorting && column.sorting_enabled().unwrap_or(true),
                    desc_first: column.desc_first().unwrap_or(options.sort_desc_first),
                };
                (column.id().to_string(), rules)
            })
            .collect();
        Self {
            columns,
            enable_sorting_removal: options.enable_sorting_removal,
            enable_multi_sort: options.enable_multi_sort,
            enable_multi_remove: options.enable_multi_remove,
            max_multi_sort_columns: options.max_multi_sort_columns,
        }
    }

    /// Returns the rules for a column.
    pub fn column(&self, id: &str) -> Option<&ColumnSortRules> {
        self.columns.get(id)
    }

    /// Returns `true` if the column exists and can be sorted.
    pub fn can_sort(&self, id: &str) -> bool {
        self.columns.get(id).is_some_and(|c| c.can_sort)
    }

    /// Checks that every entry of `state` names a known column.
    pub fn validate(&self, state: &SortState) -> Result<(), ConfigurationError> {
        match state.entries().iter().find(|e| !self.columns.contains_key(&e.id)) {
            Some(entry) => Err(ConfigurationError::unknown_column(&entry.id)),
            None => Ok(()),
        }
    }
}

/// Computes the state after a click on `column_id`.
///
/// - An unsorted column starts in its first direction (ascending unless
///   `desc_first`).
/// - From the first direction it flips to the opposite one.
/// - From the opposite direction it is removed when removal is enabled,
///   otherwise it flips back.
/// - A plain toggle replaces the whole sort with this column, unless the
///   column already is the whole sort, in which case it cycles.
/// - A multi toggle (with multi-sort enabled) cycles the column's entry in
///   place or appends a new one, dropping the oldest entries beyond
///   `max_multi_sort_columns`.
/// - A column that cannot be sorted leaves the state unchanged.
///
/// With default options this is exactly [`SortState::toggle`].
pub fn next_sort_state(
    current: &SortState,
    column_id: &str,
    rules: &SortRules,
    multi: bool,
) -> Result<SortState, ConfigurationError> {
    let column = rules
        .column(column_id)
        .ok_or_else(|| ConfigurationError::unknown_column(column_id))?;
    if !column.can_sort {
        return Ok(current.clone());
    }

    let multi = multi && rules.enable_multi_sort;
    let removal = rules.enable_sorting_removal && (!multi || rules.enable_multi_remove);
    let first = column.desc_first;
    let cycle = |desc: bool| -> Option<bool> {
        if desc == first {
            Some(!desc)
        } else if removal {
            None
        } else {
            Some(!desc)
        }
    };

    if !multi {
        let sole = current.len() == 1 && current.position_of(column_id) == Some(0);
        if !sole {
            return Ok(SortState::from_entries(vec![entry(column_id, first)]));
        }
        return Ok(match cycle(current.entries()[0].desc) {
            Some(desc) => SortState::from_entries(vec![entry(column_id, desc)]),
            None => SortState::unsorted(),
        });
    }

    let mut entries = current.entries().to_vec();
    match current.position_of(column_id) {
        Some(index) => match cycle(entries[index].desc) {
            Some(desc) => entries[index].desc = desc,
            None => {
                entries.remove(index);
            }
        },
        None => {
            entries.push(entry(column_id, first));
            if let Some(max) = rules.max_multi_sort_columns {
                let excess = entries.len().saturating_sub(max.max(1));
                entries.drain(..excess);
            }
        }
    }
    Ok(SortState::from_entries(entries))
}

fn entry(id: &str, desc: bool) -> ColumnSort {
    ColumnSort {
        id: id.to_string(),
        desc,
    }
}
