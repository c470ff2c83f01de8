//! Column definitions and how they read values from records.

mod accessor;
mod def;
mod set;

pub use accessor::*;
pub use def::*;
pub use set::*;
