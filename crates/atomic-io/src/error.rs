//! Error types for molecular file reading
//!
//! Every reader failure carries the format being read and, for per-line
//! failures, the 1-based line number at which the reader gave up.

use thiserror::Error;

use crate::traits::FileFormat;

/// Errors that can occur while reading a geometry file
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Extension not recognized, or a recognized but unimplemented dialect
    #[error("Unsupported format {format}: {reason}")]
    UnsupportedFormat {
        /// Extension or dialect name
        format: String,
        /// Why it cannot be read
        reason: String,
    },

    /// A geometry line failed numeric parsing or element resolution
    #[error("Bad input coordinates in {format} file at line {line}: {message}")]
    BadInputCoordinates {
        /// Format being read
        format: FileFormat,
        /// Line number (1-based)
        line: usize,
        /// Error message
        message: String,
    },

    /// Format-specific structural violation
    #[error("Malformed {format} file at line {line}: {message}")]
    MalformedStructure {
        /// Format being read
        format: FileFormat,
        /// Line number (1-based, 0 when the input was empty)
        line: usize,
        /// Error message
        message: String,
    },

    /// Step sequence invariant violated inside a reader
    #[error("Internal parser failure: {0}")]
    InternalFailure(String),

    /// Decompression error
    #[error("Decompression error: {0}")]
    Decompression(String),
}

/// Error taxonomy, for callers that only branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File could not be read from disk
    Io,
    /// Unknown extension or unimplemented dialect
    UnsupportedFormat,
    /// Coordinate or element parsing failed
    BadInputCoordinates,
    /// Structural violation of the format
    MalformedStructure,
    /// Parser bug
    InternalFailure,
}

impl IoError {
    /// Create an unsupported format error
    pub fn unsupported(format: impl Into<String>, reason: impl Into<String>) -> Self {
        IoError::UnsupportedFormat {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Create a bad coordinates error at a specific line
    pub fn bad_coordinates(format: FileFormat, line: usize, message: impl Into<String>) -> Self {
        IoError::BadInputCoordinates {
            format,
            line,
            message: message.into(),
        }
    }

    /// Create a structural error at a specific line
    pub fn malformed(format: FileFormat, line: usize, message: impl Into<String>) -> Self {
        IoError::MalformedStructure {
            format,
            line,
            message: message.into(),
        }
    }

    /// Create an internal failure error
    pub fn internal(message: impl Into<String>) -> Self {
        IoError::InternalFailure(message.into())
    }

    /// The taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IoError::Io(_) | IoError::Decompression(_) => ErrorKind::Io,
            IoError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            IoError::BadInputCoordinates { .. } => ErrorKind::BadInputCoordinates,
            IoError::MalformedStructure { .. } => ErrorKind::MalformedStructure,
            IoError::InternalFailure(_) => ErrorKind::InternalFailure,
        }
    }

    /// The 1-based line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            IoError::BadInputCoordinates { line, .. } | IoError::MalformedStructure { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}

/// Result type for molecular file reading
pub type IoResult<T> = Result<T, IoError>;
