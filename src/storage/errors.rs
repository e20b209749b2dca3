//! Storage error types
//!
//! Error codes:
//! - QUARRY_TABLE_NOT_FOUND
//! - QUARRY_STORAGE_IO_ERROR
//! - QUARRY_STORAGE_MALFORMED

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised while reading base table files.
///
/// These are propagated to the caller unchanged; nothing above storage
/// retries or repairs them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No file backs the requested table
    #[error("Table file not found: {}", .path.display())]
    TableNotFound { path: PathBuf },

    /// Opening or reading the file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV reader rejected the file contents
    #[error("Malformed table file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record does not have one field per header column
    #[error("Row {row} of {} has {found} fields, header has {expected}", .path.display())]
    RowArity {
        path: PathBuf,
        row: u64,
        expected: usize,
        found: usize,
    },

    /// The file has no header record
    #[error("Table file {} has no header", .path.display())]
    MissingHeader { path: PathBuf },
}

impl StorageError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::TableNotFound { .. } => "QUARRY_TABLE_NOT_FOUND",
            StorageError::Io { .. } => "QUARRY_STORAGE_IO_ERROR",
            StorageError::Csv { .. } | StorageError::RowArity { .. } | StorageError::MissingHeader { .. } => {
                "QUARRY_STORAGE_MALFORMED"
            }
        }
    }

    /// Classifies an I/O failure on `path`, separating missing files.
    pub(crate) fn from_io(path: &std::path::Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StorageError::TableNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wraps a CSV error, keeping I/O failures in the I/O class.
    pub(crate) fn from_csv(path: &std::path::Path, source: csv::Error) -> Self {
        if source.is_io_error() {
            StorageError::Io {
                path: path.to_path_buf(),
                source: io::Error::from(source),
            }
        } else {
            StorageError::Csv {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_missing_file_is_table_not_found() {
        let err = StorageError::from_io(
            Path::new("tables/ghost.csv"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, StorageError::TableNotFound { .. }));
        assert_eq!(err.code(), "QUARRY_TABLE_NOT_FOUND");
        assert!(err.to_string().contains("tables/ghost.csv"));
    }

    #[test]
    fn test_other_io_is_io_error() {
        let err = StorageError::from_io(
            Path::new("t.csv"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.code(), "QUARRY_STORAGE_IO_ERROR");
    }

    #[test]
    fn test_row_arity_display() {
        let err = StorageError::RowArity {
            path: PathBuf::from("a.csv"),
            row: 3,
            expected: 2,
            found: 5,
        };
        let display = err.to_string();
        assert!(display.contains("Row 3"));
        assert!(display.contains("5 fields"));
        assert_eq!(err.code(), "QUARRY_STORAGE_MALFORMED");
    }
}
