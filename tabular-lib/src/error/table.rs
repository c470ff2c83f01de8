//! Top-level error for table operations

use super::ComparatorFault;
use super::ConfigurationError;

/// Errors returned when building a row model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The column set or sort state is invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A custom comparator failed during sorting.
    #[error(transparent)]
    Comparator(#[from] ComparatorFault),
}

impl TableError {
    /// Returns `true` if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, TableError::Configuration(_))
    }

    /// Returns `true` if this is a comparator fault.
    pub fn is_comparator(&self) -> bool {
        matches!(self, TableError::Comparator(_))
    }
}
