use crate::util::TimeParseError;

/// Reasons a status document is rejected as a whole.
///
/// Any of these aborts the scan of the current source; no measurements of
/// that source reach the sink.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("unexpected status file contents: {prefix:?}")]
    UnrecognizedFormat { prefix: String },

    #[error("{0} should be preceded by a HEADER record")]
    MissingHeader(String),

    #[error("HEADER for {0} describes a different number of columns")]
    HeaderArityMismatch(String),

    #[error("unsupported record type: {0:?}")]
    UnsupportedRecordType(String),

    #[error("invalid numeric value {value:?} in column {column:?}")]
    InvalidNumericValue { column: String, value: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] TimeParseError),

    #[error("failed to read status: {0}")]
    Io(#[from] std::io::Error),
}
