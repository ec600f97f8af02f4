//! Error types for dxfmodel

use std::io;
use thiserror::Error;

/// Main error type for dxfmodel operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred during stream operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A group code or value token could not be decoded.
    ///
    /// The offending line has already been consumed, so a lenient caller
    /// may retry the read to skip-and-resync.
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// A section body hit end-of-stream before its ENDSEC marker
    #[error("section '{0}' is missing its ENDSEC marker")]
    TruncatedSection(String),

    /// The stream ended before the top-level EOF marker
    #[error("stream ended before EOF marker")]
    TruncatedStream,

    /// A uniqueness-enforcing table already holds an entry with this name
    #[error("duplicate table entry name: '{0}'")]
    DuplicateName(String),

    /// A name reference could not be resolved against the model
    #[error("unresolved reference: '{0}'")]
    UnresolvedReference(String),

    /// The read was cancelled through the cooperative cancellation flag
    #[error("read cancelled")]
    Cancelled,

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for dxfmodel operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DxfError::TruncatedSection("ENTITIES".to_string());
        assert_eq!(
            err.to_string(),
            "section 'ENTITIES' is missing its ENDSEC marker"
        );
    }

    #[test]
    fn test_malformed_record_display() {
        let err = DxfError::MalformedRecord {
            line: 42,
            message: "invalid group code 'abc'".to_string(),
        };
        assert!(err.to_string().contains("line 42"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: DxfError = io_err.into();
        assert!(matches!(err, DxfError::Io(_)));
    }
}
