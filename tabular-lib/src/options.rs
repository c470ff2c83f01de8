//! Table options

use std::cmp::Ordering;

use crate::sort::Direction;

/// Where rows without a value go when their column is sorted.
///
/// `Greater` and `Lesser` are relative: descending order flips them, like any
/// other comparison. `First` and `Last` are absolute and ignore direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoValuePolicy {
    /// No-value compares greater than any value (last when ascending).
    #[default]
    Greater,
    /// No-value compares less than any value (first when ascending).
    Lesser,
    /// No-value rows always come first.
    First,
    /// No-value rows always come last.
    Last,
    /// Hand no-value cells to the column comparator like any other value.
    Compare,
}

impl NoValuePolicy {
    /// Orders a pair where at least one side is missing.
    ///
    /// Returns `None` when both values are present or the policy defers to
    /// the comparator. The result already accounts for `direction` and
    /// `invert`, so the caller uses it as is.
    pub(crate) fn order(
        self,
        a_missing: bool,
        b_missing: bool,
        direction: Direction,
        invert: bool,
    ) -> Option<Ordering> {
        if !a_missing && !b_missing {
            return None;
        }
        if a_missing && b_missing {
            return match self {
                NoValuePolicy::Compare => None,
                _ => Some(Ordering::Equal),
            };
        }
        let missing_greater = if a_missing {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        match self {
            NoValuePolicy::Compare => None,
            NoValuePolicy::Last => Some(missing_greater),
            NoValuePolicy::First => Some(missing_greater.reverse()),
            NoValuePolicy::Greater | NoValuePolicy::Lesser => {
                let base = if self == NoValuePolicy::Greater {
                    missing_greater
                } else {
                    missing_greater.reverse()
                };
                let directed = direction.apply(base);
                Some(if invert { directed.reverse() } else { directed })
            }
        }
    }
}

/// Table-wide sorting options.
///
/// Column definitions can override the per-column settings
/// (`enable_sorting`, `sort_desc_first`, `no_value`).
///
/// # Example
///
/// ```
/// use tabular_lib::{NoValuePolicy, TableOptions};
///
/// let options = TableOptions::default()
///     .with_no_value(NoValuePolicy::Last)
///     .with_multi_sort(true)
///     .with_max_multi_sort_columns(2);
/// assert!(options.enable_multi_sort);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Placement of missing values.
    ///
    /// Default: `NoValuePolicy::Greater`
    pub no_value: NoValuePolicy,

    /// Whether columns can be sorted by toggling at all.
    ///
    /// Default: `true`
    pub enable_sorting: bool,

    /// Whether the toggle cycle passes through "unsorted".
    ///
    /// Default: `true`
    pub enable_sorting_removal: bool,

    /// Whether multi toggles add columns instead of replacing the sort.
    ///
    /// Default: `false`
    pub enable_multi_sort: bool,

    /// Whether multi toggles may remove a column from the sort.
    ///
    /// Default: `true`
    pub enable_multi_remove: bool,

    /// Upper bound on sorted columns; the oldest entries are dropped.
    ///
    /// Default: unbounded
    pub max_multi_sort_columns: Option<usize>,

    /// Whether a newly sorted column starts descending.
    ///
    /// Default: `false`
    pub sort_desc_first: bool,

    /// Keep rows in input order regardless of the sort state; the caller
    /// sorted them already.
    ///
    /// Default: `false`
    pub manual_sorting: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            no_value: NoValuePolicy::Greater,
            enable_sorting: true,
            enable_sorting_removal: true,
            enable_multi_sort: false,
            enable_multi_remove: true,
            max_multi_sort_columns: None,
            sort_desc_first: false,
            manual_sorting: false,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the no-value policy.
    pub fn with_no_value(mut self, policy: NoValuePolicy) -> Self {
        self.no_value = policy;
        self
    }

    /// Enables or disables sorting toggles.
    pub fn with_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    /// Enables or disables the "unsorted" step of the toggle cycle.
    pub fn with_sorting_removal(mut self, enabled: bool) -> Self {
        self.enable_sorting_removal = enabled;
        self
    }

    /// Enables or disables multi-column sorting.
    pub fn with_multi_sort(mut self, enabled: bool) -> Self {
        self.enable_multi_sort = enabled;
        self
    }

    /// Enables or disables removal through multi toggles.
    pub fn with_multi_remove(mut self, enabled: bool) -> Self {
        self.enable_multi_remove = enabled;
        self
    }

    /// Caps the number of sorted columns.
    pub fn with_max_multi_sort_columns(mut self, max: usize) -> Self {
        self.max_multi_sort_columns = Some(max);
        self
    }

    /// Starts new sorts descending.
    pub fn with_sort_desc_first(mut self, desc_first: bool) -> Self {
        self.sort_desc_first = desc_first;
        self
    }

    /// Leaves row order to the caller.
    pub fn with_manual_sorting(mut self, manual: bool) -> Self {
        self.manual_sorting = manual;
        self
    }
}
