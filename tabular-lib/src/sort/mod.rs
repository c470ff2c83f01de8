//! Sorting: comparators, the comparator registry, sort state and its
//! transitions.
//!
//! # Overview
//!
//! - [`Comparator`] - the ordering rule a column declares
//! - [`ComparatorRegistry`] - named comparators, resolves a column's rule
//! - [`SortState`] - the active sort, a value replaced on every change
//! - [`next_sort_state`] - header-click transition honouring table options
//! - [`SortController`] - shared owner of the current state

mod collate;
mod comparator;
mod controller;
mod registry;
mod state;
mod toggle;

pub use collate::alphanumeric_cmp;
pub use collate::locale_cmp;
pub use comparator::*;
pub use controller::SortController;
pub use registry::*;
pub use state::*;
pub use toggle::*;
