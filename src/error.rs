//! Error types for CSV reading and writing

use thiserror::Error;

/// Errors that can occur while configuring, reading or writing CSV data
#[derive(Debug, Error)]
pub enum CsvError {
    /// A record's cell count did not match the header count.
    ///
    /// Only raised in strict mode, and only when the offending record is
    /// actually pulled from the row iterator.
    #[error("expected {expected} cells in the row, found {actual}")]
    InvalidCellCount {
        /// Number of headers the record was matched against
        expected: usize,
        /// Number of cells the record actually contained
        actual: usize,
    },

    /// A custom header-matching pattern was rejected at configuration time.
    ///
    /// The pattern either failed to compile or is missing the required
    /// `header` named capture group.
    #[error("header matching pattern is not acceptable: '{0}'")]
    InvalidHeaderPattern(String),

    /// An I/O error from the underlying source or sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for `Result<T, CsvError>`
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count_message_carries_counts() {
        let err = CsvError::InvalidCellCount {
            expected: 3,
            actual: 2,
        };
        let message = err.to_string();
        assert!(message.contains('3'));
        assert!(message.contains('2'));
    }

    #[test]
    fn test_header_pattern_message_carries_pattern() {
        let err = CsvError::InvalidHeaderPattern("^(.*)$".to_string());
        assert!(err.to_string().contains("^(.*)$"));
    }
}
