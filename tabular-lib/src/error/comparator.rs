//! Comparator faults

/// A custom comparator failed while ordering rows.
///
/// Unlike accessor faults this is not recoverable: falling back to another
/// order would break the sort guarantees, so the build is aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Comparator for column '{column}' failed: {message}")]
pub struct ComparatorFault {
    /// The sorted column whose comparator failed.
    pub column: String,
    /// Error or panic message.
    pub message: String,
}

impl ComparatorFault {
    /// Creates a new comparator fault.
    pub fn new(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            message: message.into(),
        }
    }
}
