//! Sequential reader over a CSV table file
//!
//! The first record is the header. Every following record is one row and
//! must carry exactly one field per header column.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use super::errors::{StorageError, StorageResult};

/// Reads the records of one table file in file order.
pub struct TableReader {
    /// Path to the table file
    path: PathBuf,
    /// Column names exactly as written in the header
    columns: Vec<String>,
    /// Underlying CSV reader, positioned after the last returned record
    reader: csv::Reader<File>,
    /// Reused record buffer
    record: StringRecord,
    /// Number of data records returned so far
    rows_read: u64,
}

impl TableReader {
    /// Opens a table file and reads its header.
    pub fn open(path: &Path, delimiter: u8) -> StorageResult<Self> {
        let file = File::open(path).map_err(|e| StorageError::from_io(path, e))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| StorageError::from_csv(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        if columns.is_empty() || columns.iter().all(String::is_empty) {
            return Err(StorageError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            columns,
            reader,
            record: StringRecord::new(),
            rows_read: 0,
        })
    }

    /// Returns the table file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the header column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns how many data records have been read.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(fields))` if a record was read
    /// - `Ok(None)` at end of file
    /// - `Err(..)` if the file is unreadable or the record is malformed
    pub fn read_next(&mut self) -> StorageResult<Option<Vec<String>>> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| StorageError::from_csv(&self.path, e))?;
        if !more {
            return Ok(None);
        }

        self.rows_read += 1;

        if self.record.len() != self.columns.len() {
            return Err(StorageError::RowArity {
                path: self.path.clone(),
                row: self.rows_read,
                expected: self.columns.len(),
                found: self.record.len(),
            });
        }

        Ok(Some(self.record.iter().map(str::to_string).collect()))
    }
}
