//! Accessor faults

/// An accessor failed for one record.
///
/// Faults never abort a row model build. The affected cell resolves to
/// [`Value::Null`](crate::model::Value::Null) and the fault is reported
/// through [`RowModel::faults`](crate::row_model::RowModel::faults), so one
/// malformed record cannot blank the whole table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Accessor for column '{column}' failed on row {row}: {message}")]
pub struct AccessorFault {
    /// The column whose accessor failed.
    pub column: String,
    /// Index of the record in the input sequence.
    pub row: usize,
    /// Error or panic message.
    pub message: String,
}

impl AccessorFault {
    /// Creates a new accessor fault.
    pub fn new(column: impl Into<String>, row: usize, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            row,
            message: message.into(),
        }
    }
}
