//! Table configuration errors

/// A column set or sort request that cannot be honoured.
///
/// Configuration errors are fatal to the call that raised them: no row model
/// is produced, so a caller never renders stale or silently unsorted rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Two columns in the same set share an id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumn { id: String },

    /// A sort entry or toggle names a column that is not in the set.
    #[error("Unknown column '{id}'")]
    UnknownColumn { id: String },

    /// A column refers to a named comparator that is not registered.
    #[error("Column '{column}' uses unknown comparator '{name}'")]
    UnknownComparator { column: String, name: String },
}

impl ConfigurationError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }

    /// Creates a new unknown column error.
    pub fn unknown_column(id: impl Into<String>) -> Self {
        Self::UnknownColumn { id: id.into() }
    }

    /// Creates a new unknown comparator error.
    pub fn unknown_comparator(column: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownComparator {
            column: column.into(),
            name: name.into(),
        }
    }
}
