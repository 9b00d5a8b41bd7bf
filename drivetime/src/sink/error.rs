//! Sink error types.

/// Errors writing result rows.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing delimited data failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The first row written would leave the sink without columns
    #[error("cannot establish a schema from an empty row")]
    EmptyRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SinkError::EmptyRow.to_string(),
            "cannot establish a schema from an empty row"
        );

        let err = SinkError::from(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "I/O error: disk full");
    }
}
