//! Base table scan

use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::storage::TableReader;

use super::errors::{ExecutorError, ExecutorResult};
use super::operator::{Operator, OperatorKind, PlanNode};
use super::row::{Header, Row, Value};

/// Leaf operator yielding a table's rows in file order.
///
/// The header is read when the scan is created; the file is opened for
/// rows on the first `next` and reopened after each `reset`. After a read
/// error every pull fails until the scan is reset.
pub struct DataSource {
    table: String,
    path: PathBuf,
    delimiter: u8,
    header: Header,
    reader: Option<TableReader>,
    exhausted: bool,
    failed: bool,
}

impl DataSource {
    /// Creates a scan of `table` stored at `path`.
    pub fn open(table: impl Into<String>, path: &Path, delimiter: u8) -> ExecutorResult<Self> {
        let table = table.into();
        let reader = TableReader::open(path, delimiter)
            .map_err(|e| ExecutorError::scan_failed(&table, e))?;
        let columns = reader
            .columns()
            .iter()
            .map(|c| qualify(&table, c))
            .collect();
        let header = Header::new(columns)?;

        Ok(Self {
            table,
            path: path.to_path_buf(),
            delimiter,
            header,
            reader: None,
            exhausted: false,
            failed: false,
        })
    }

    /// Creates a scan of `table` at the location the config assigns it.
    pub fn for_table(table: &str, config: &EngineConfig) -> ExecutorResult<Self> {
        Self::open(table, &config.table_path(table), config.delimiter_byte())
    }

    /// Table this scan reads
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `table.column` unless the column is already qualified
fn qualify(table: &str, column: &str) -> String {
    if column.contains('.') {
        column.to_string()
    } else {
        format!("{}.{}", table, column)
    }
}

impl Operator for DataSource {
    fn header(&self) -> &Header {
        &self.header
    }

    fn next(&mut self) -> ExecutorResult<Row> {
        if self.failed {
            return Err(ExecutorError::scan_aborted(&self.table));
        }
        if self.exhausted {
            return Ok(Row::empty());
        }

        let read = match self.reader.as_mut() {
            Some(reader) => reader.read_next(),
            None => TableReader::open(&self.path, self.delimiter)
                .and_then(|reader| self.reader.insert(reader).read_next()),
        };

        match read {
            Ok(Some(fields)) => Ok(Row::new(fields.iter().map(|f| Value::parse(f)).collect())),
            Ok(None) => {
                self.exhausted = true;
                self.reader = None;
                Ok(Row::empty())
            }
            Err(e) => {
                self.failed = true;
                self.reader = None;
                Err(ExecutorError::scan_failed(&self.table, e))
            }
        }
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.reader = None;
        self.exhausted = false;
        self.failed = false;
        Ok(())
    }

    fn explain(&self) -> PlanNode {
        PlanNode::leaf(OperatorKind::Scan, self.table.clone())
    }
}
