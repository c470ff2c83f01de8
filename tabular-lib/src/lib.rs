//! Headless table engine
//!
//! Turns records plus column definitions into ordered rows, and tracks the
//! sort a table UI toggles through. Rendering is left to the caller.
//!
//! # Overview
//!
//! - [`column`] - column definitions and accessors
//! - [`sort`] - comparators, sort state and toggling
//! - [`row_model`] - resolved, ordered rows
//! - [`Table`] - columns plus [`TableOptions`], the usual entry point
//! - [`model`] - a dynamic [`Record`](model::Record) type for untyped data

pub mod column;
pub mod error;
pub mod model;
pub mod row_model;
pub mod sort;

mod options;
mod table;

pub use options::*;
pub use table::*;
