//! Error types for DSV read and write sessions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when configuring, reading, or writing DSV tables.
///
/// Two classes exist: configuration errors ([`EmptyPath`](Self::EmptyPath),
/// [`InvalidDelimiter`](Self::InvalidDelimiter),
/// [`InvalidEnclosure`](Self::InvalidEnclosure)) are raised before any I/O
/// happens, everything else is raised at the point of detection during
/// streaming, annotated with the 1-based physical line number where one
/// applies. There are no internal retries; output written before a failure
/// is not rolled back.
#[derive(Debug, Error)]
pub enum DsvError {
    /// Session path is empty.
    #[error("path must not be empty")]
    EmptyPath,

    /// Delimiter is not exactly one character.
    #[error("delimiter must be a single character, got {value:?}")]
    InvalidDelimiter { value: String },

    /// Enclosure is not exactly one character.
    #[error("enclosure must be a single character, got {value:?}")]
    InvalidEnclosure { value: String },

    /// Read path does not reference an existing regular file.
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Read path exists but cannot be read.
    #[error("path is not readable: {path}")]
    NotReadable { path: PathBuf },

    /// Destination directory is missing or cannot be written to.
    #[error("path is not writable: {path}")]
    NotWritable { path: PathBuf },

    /// Underlying handle failed to open.
    #[error("could not open handle: {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Header flag is set but the input has no first line.
    #[error("header not found on line 1")]
    HeaderNotFound,

    /// A non-empty physical line could not be parsed into fields.
    #[error("malformed record on line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    /// Field count of a data line does not match the active header.
    #[error("malformed record on line {line}: expected {expected} fields, got {actual}")]
    FieldCountMismatch {
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// Header line failed to reach the output.
    #[error("could not write header on line {line}: {source}")]
    WriteHeader {
        line: u64,
        source: std::io::Error,
    },

    /// A data row failed to reach the output.
    #[error("could not write row on line {line}: {source}")]
    WriteRow {
        line: u64,
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for DSV operations.
pub type Result<T> = std::result::Result<T, DsvError>;

impl DsvError {
    /// Create a MalformedRecord error.
    pub fn malformed_record(line: u64, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// True for errors raised by configuration validation, before any I/O.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPath | Self::InvalidDelimiter { .. } | Self::InvalidEnclosure { .. }
        )
    }

    /// The 1-based physical line number attached to this error, if any.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::HeaderNotFound => Some(1),
            Self::MalformedRecord { line, .. }
            | Self::FieldCountMismatch { line, .. }
            | Self::WriteHeader { line, .. }
            | Self::WriteRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DsvError::malformed_record(7, "unterminated enclosure");
        assert_eq!(
            format!("{err}"),
            "malformed record on line 7: unterminated enclosure"
        );

        let err = DsvError::FieldCountMismatch {
            line: 3,
            expected: 2,
            actual: 5,
        };
        assert_eq!(
            format!("{err}"),
            "malformed record on line 3: expected 2 fields, got 5"
        );

        let err = DsvError::HeaderNotFound;
        assert_eq!(format!("{err}"), "header not found on line 1");
    }

    #[test]
    fn test_config_error_class() {
        assert!(DsvError::EmptyPath.is_config_error());
        assert!(
            DsvError::InvalidDelimiter {
                value: ";;".to_string()
            }
            .is_config_error()
        );
        assert!(!DsvError::HeaderNotFound.is_config_error());
        assert!(
            !DsvError::NotAFile {
                path: PathBuf::from("x.csv")
            }
            .is_config_error()
        );
    }

    #[test]
    fn test_line_annotation() {
        assert_eq!(DsvError::HeaderNotFound.line(), Some(1));
        assert_eq!(DsvError::malformed_record(12, "x").line(), Some(12));
        assert_eq!(DsvError::EmptyPath.line(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let dsv_err: DsvError = io_err.into();
        assert!(matches!(dsv_err, DsvError::Io(_)));
    }
}
