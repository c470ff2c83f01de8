//! Sort state types.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns `true` for [`Direction::Desc`].
    pub fn is_desc(self) -> bool {
        self == Direction::Desc
    }

    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    fn from_desc(desc: bool) -> Self {
        if desc { Direction::Desc } else { Direction::Asc }
    }
}

/// One entry of a sort: a column and whether it sorts descending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSort {
    /// The sorted column's id.
    pub id: String,
    /// `true` for descending order.
    pub desc: bool,
}

impl ColumnSort {
    /// Creates an ascending entry.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Creates a descending entry.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }

    /// Returns the entry's direction.
    pub fn direction(&self) -> Direction {
        Direction::from_desc(self.desc)
    }
}

/// The active sort, as an ordered list of column entries.
///
/// Earlier entries take precedence; later ones break ties. The usual state
/// holds at most one entry. A `SortState` is a value: transitions return a
/// new state and never modify the old one.
///
/// Serializes as a plain array, e.g. `[{"id":"age","desc":true}]`.
///
/// # Example
///
/// ```
/// use tabular_lib::sort::{SortState, SortStatus};
///
/// let state = SortState::unsorted().toggle("age");
/// assert_eq!(state.status(), SortStatus::Ascending("age".into()));
///
/// let state = state.toggle("age");
/// assert_eq!(state.status(), SortStatus::Descending("age".into()));
///
/// let state = state.toggle("age");
/// assert_eq!(state.status(), SortStatus::Unsorted);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortState {
    entries: Vec<ColumnSort>,
}

impl SortState {
    /// The empty sort.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sorts ascending on a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            entries: vec![ColumnSort::asc(id)],
        }
    }

    /// Sorts descending on a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            entries: vec![ColumnSort::desc(id)],
        }
    }

    /// Builds a state from explicit entries.
    pub fn from_entries(entries: Vec<ColumnSort>) -> Self {
        Self { entries }
    }

    /// Adds a secondary ascending entry.
    pub fn then_asc(mut self, id: impl Into<String>) -> Self {
        self.entries.push(ColumnSort::asc(id));
        self
    }

    /// Adds a secondary descending entry.
    pub fn then_desc(mut self, id: impl Into<String>) -> Self {
        self.entries.push(ColumnSort::desc(id));
        self
    }

    /// Returns the entries in precedence order.
    pub fn entries(&self) -> &[ColumnSort] {
        &self.entries
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entry with the highest precedence.
    pub fn primary(&self) -> Option<&ColumnSort> {
        self.entries.first()
    }

    /// Returns the precedence index of a column, if it is sorted.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Returns the direction a column sorts in, if it is sorted.
    pub fn direction_of(&self, id: &str) -> Option<Direction> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(ColumnSort::direction)
    }

    /// Projects the state onto the three-state sort cycle, using the primary
    /// entry.
    pub fn status(&self) -> SortStatus {
        match self.primary() {
            None => SortStatus::Unsorted,
            Some(entry) if entry.desc => SortStatus::Descending(entry.id.clone()),
            Some(entry) => SortStatus::Ascending(entry.id.clone()),
        }
    }

    /// Advances the sort cycle for a click on `id`.
    ///
    /// `Unsorted` → `Ascending(id)` → `Descending(id)` → `Unsorted`. Clicking
    /// another column starts over at `Ascending` for that column and drops
    /// the previous one.
    ///
    /// This is the plain cycle. Tables apply their options (descending first,
    /// no removal, multi-sort) through
    /// [`next_sort_state`](super::next_sort_state) instead.
    pub fn toggle(&self, id: &str) -> SortState {
        match self.status() {
            SortStatus::Ascending(current) if current == id => SortState::desc(id),
            SortStatus::Descending(current) if current == id => SortState::unsorted(),
            _ => SortState::asc(id),
        }
    }
}

impl FromIterator<ColumnSort> for SortState {
    fn from_iter<I: IntoIterator<Item = ColumnSort>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A sort state seen as the three-state cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortStatus {
    /// Nothing sorted.
    Unsorted,
    /// Sorted ascending on the column.
    Ascending(String),
    /// Sorted descending on the column.
    Descending(String),
}

impl SortStatus {
    /// The sorted column, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            SortStatus::Unsorted => None,
            SortStatus::Ascending(id) | SortStatus::Descending(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_unsorted() {
        let state = SortState::unsorted();
        let state = state.toggle("a").toggle("a").toggle("a");
        assert_eq!(state.status(), SortStatus::Unsorted);
        assert!(state.is_empty());
    }

    #[test]
    fn test_other_column_restarts_cycle() {
        let from_asc = SortState::asc("a").toggle("b");
        let from_desc = SortState::desc("a").toggle("b");
        assert_eq!(from_asc, SortState::asc("b"));
        assert_eq!(from_desc, SortState::asc("b"));
    }

    #[test]
    fn test_toggle_leaves_original_untouched() {
        let original = SortState::asc("a");
        let next = original.toggle("a");
        assert_eq!(original, SortState::asc("a"));
        assert_eq!(next, SortState::desc("a"));
    }

    #[test]
    fn test_lookup_helpers() {
        let state = SortState::desc("status").then_asc("age");
        assert_eq!(state.len(), 2);
        assert_eq!(state.position_of("age"), Some(1));
        assert_eq!(state.direction_of("status"), Some(Direction::Desc));
        assert_eq!(state.direction_of("name"), None);
        assert_eq!(state.status().column(), Some("status"));
    }

    #[test]
    fn test_serializes_as_array() {
        let state = SortState::desc("age");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"[{"id":"age","desc":true}]"#);

        let back: SortState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.reversed(), Direction::Asc);
    }
}
