//! Error types for the data-loader crate.
//!
//! Every variant is fatal to a run: the loaders never skip a bad line or
//! hand back a partial result.

use thiserror::Error;

/// Errors that can occur while reading training, test-pair or user-list files
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A line has fewer fields than its format requires
    #[error("Expected at least {expected} fields but found {found} at line {line} in {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },
}

impl DataLoadError {
    /// True for the variants caused by malformed file contents rather than
    /// by the file system.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DataLoadError::ParseError { .. } | DataLoadError::FieldCountMismatch { .. }
        )
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
