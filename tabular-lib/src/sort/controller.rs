//! Shared owner of the current sort state.

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use super::SortRules;
use super::SortState;
use super::SortStatus;
use super::next_sort_state;
use crate::error::ConfigurationError;

/// Holds the current [`SortState`] and advances it on header clicks.
///
/// The state is stored as an `Arc<SortState>` and every transition swaps in
/// a new `Arc`, so a reader holding the previous one keeps a consistent
/// snapshot. Clones share the same state.
///
/// The dirty flag is set by every change and cleared by
/// [`take_dirty`](Self::take_dirty); a render loop uses it to decide whether
/// to rebuild the row model.
///
/// # Example
///
/// ```
/// use tabular_lib::Table;
/// use tabular_lib::column::ColumnDef;
/// use tabular_lib::model::Record;
/// use tabular_lib::sort::SortStatus;
///
/// let table: Table<Record> = Table::new(vec![ColumnDef::key("age")]).unwrap();
/// let sorting = table.sort_controller();
///
/// sorting.toggle("age").unwrap();
/// assert_eq!(sorting.status(), SortStatus::Ascending("age".into()));
/// assert!(sorting.take_dirty());
/// assert!(!sorting.take_dirty());
/// ```
#[derive(Debug, Clone)]
pub struct SortController {
    rules: Arc<SortRules>,
    state: Arc<RwLock<Arc<SortState>>>,
    dirty: Arc<AtomicBool>,
}

impl SortController {
    /// Creates a controller starting unsorted.
    pub fn new(rules: SortRules) -> Self {
        Self {
            rules: Arc::new(rules),
            state: Arc::new(RwLock::new(Arc::new(SortState::unsorted()))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The rules transitions follow.
    pub fn rules(&self) -> &SortRules {
        &self.rules
    }

    /// Returns a snapshot of the current state.
    pub fn current(&self) -> Arc<SortState> {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Returns the current state as the three-state cycle.
    pub fn status(&self) -> SortStatus {
        self.current().status()
    }

    /// Applies a plain click on a column header.
    pub fn toggle(&self, column_id: &str) -> Result<Arc<SortState>, ConfigurationError> {
        self.transition(column_id, false)
    }

    /// Applies a multi-sort click (e.g. shift-click) on a column header.
    pub fn toggle_multi(&self, column_id: &str) -> Result<Arc<SortState>, ConfigurationError> {
        self.transition(column_id, true)
    }

    /// Replaces the state, after checking its column ids.
    pub fn set(&self, state: SortState) -> Result<(), ConfigurationError> {
        self.rules.validate(&state)?;
        self.replace(Arc::new(state));
        Ok(())
    }

    /// Clears the sort.
    pub fn clear(&self) {
        self.replace(Arc::new(SortState::unsorted()));
    }

    /// Returns whether the state changed since the last call, and resets the
    /// flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    fn transition(&self, column_id: &str, multi: bool) -> Result<Arc<SortState>, ConfigurationError> {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(next_sort_state(&guard, column_id, &self.rules, multi)?);
        if *next != **guard {
            log::trace!(
                "SortController: toggle '{}' (multi: {}): {:?} -> {:?}",
                column_id,
                multi,
                guard.entries(),
                next.entries()
            );
            *guard = Arc::clone(&next);
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(next)
    }

    fn replace(&self, next: Arc<SortState>) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        log::trace!("SortController: set {:?} -> {:?}", guard.entries(), next.entries());
        *guard = next;
        self.dirty.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::TableOptions;
    use crate::column::ColumnDef;
    use crate::column::ColumnSet;
    use crate::model::Record;

    fn controller() -> SortController {
        let columns: ColumnSet<Record> =
            ColumnSet::new(vec![ColumnDef::key("a"), ColumnDef::key("b")]).unwrap();
        SortController::new(SortRules::new(&columns, &TableOptions::default()))
    }

    #[test]
    fn test_snapshot_survives_toggle() {
        let sorting = controller();
        sorting.toggle("a").unwrap();
        let before = sorting.current();
        sorting.toggle("a").unwrap();
        assert_eq!(*before, SortState::asc("a"));
        assert_eq!(*sorting.current(), SortState::desc("a"));
    }

    #[test]
    fn test_cycle_through_controller() {
        let sorting = controller();
        sorting.toggle("a").unwrap();
        sorting.toggle("b").unwrap();
        assert_eq!(sorting.status(), SortStatus::Ascending("b".into()));
    }

    #[test]
    fn test_unknown_column_keeps_state() {
        let sorting = controller();
        sorting.toggle("a").unwrap();
        assert!(sorting.toggle("zip").is_err());
        assert_eq!(*sorting.current(), SortState::asc("a"));
    }

    #[test]
    fn test_set_validates() {
        let sorting = controller();
        assert!(sorting.set(SortState::desc("b")).is_ok());
        assert!(sorting.set(SortState::desc("zip")).is_err());
        assert_eq!(*sorting.current(), SortState::desc("b"));
    }

    #[test]
    fn test_dirty_flag() {
        let sorting = controller();
        assert!(!sorting.take_dirty());
        sorting.clear();
        assert!(sorting.take_dirty());
        assert!(!sorting.take_dirty());
    }

    #[test]
    fn test_concurrent_toggles_are_serialized() {
        let sorting = controller();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sorting = sorting.clone();
                thread::spawn(move || {
                    sorting.toggle("a").unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        // Eight clicks on one column: 8 % 3 == 2 steps into the cycle.
        assert_eq!(*sorting.current(), SortState::desc("a"));
    }
}
