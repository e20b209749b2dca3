//! Executor error types
//!
//! Error codes:
//! - QUARRY_UNKNOWN_ATTRIBUTE
//! - QUARRY_DUPLICATE_COLUMN
//! - QUARRY_SCAN_FAILED

use std::fmt;

use crate::storage::StorageError;

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// An attribute name is absent from the header it is resolved against
    UnknownAttribute,
    /// A header would contain the same column twice
    DuplicateColumn,
    /// Reading a base table failed
    ScanFailed,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::UnknownAttribute => "QUARRY_UNKNOWN_ATTRIBUTE",
            ExecutorErrorCode::DuplicateColumn => "QUARRY_DUPLICATE_COLUMN",
            ExecutorErrorCode::ScanFailed => "QUARRY_SCAN_FAILED",
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error with context
#[derive(Debug)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
    /// Attribute name if applicable
    attribute: Option<String>,
    /// Underlying storage failure for scan errors
    source: Option<StorageError>,
}

impl ExecutorError {
    /// Create an unknown attribute error listing the available columns
    pub fn unknown_attribute(name: impl Into<String>, available: &[String]) -> Self {
        let name = name.into();
        Self {
            code: ExecutorErrorCode::UnknownAttribute,
            message: format!(
                "Attribute '{}' not found among [{}]",
                name,
                available.join(", ")
            ),
            attribute: Some(name),
            source: None,
        }
    }

    /// Create a duplicate column error
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: ExecutorErrorCode::DuplicateColumn,
            message: format!("Column '{}' appears more than once", name),
            attribute: Some(name),
            source: None,
        }
    }

    /// Create a scan failure wrapping the storage error
    pub fn scan_failed(table: &str, source: StorageError) -> Self {
        Self {
            code: ExecutorErrorCode::ScanFailed,
            message: format!("Scan of table '{}' failed: {}", table, source),
            attribute: None,
            source: Some(source),
        }
    }

    /// Create the error repeated by a scan that already failed
    pub fn scan_aborted(table: &str) -> Self {
        Self {
            code: ExecutorErrorCode::ScanFailed,
            message: format!(
                "Scan of table '{}' stopped at an earlier error; reset to restart",
                table
            ),
            attribute: None,
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the attribute name if applicable
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns the storage error behind a scan failure
    pub fn storage_error(&self) -> Option<&StorageError> {
        self.source.as_ref()
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
