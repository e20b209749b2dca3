//! Materialized query output

use serde::Serialize;

use super::errors::ExecutorResult;
use super::operator::Operator;
use super::row::Row;

/// All rows of a plan, drained in output order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    /// Output column names
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Pulls `root` until the empty row.
    ///
    /// Any operator error aborts collection and is returned unchanged.
    pub fn collect(root: &mut dyn Operator) -> ExecutorResult<Self> {
        let header = root.header().names().to_vec();
        let mut rows = Vec::new();
        loop {
            let row = root.next()?;
            if row.is_empty() {
                break;
            }
            rows.push(row);
        }
        Ok(Self { header, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Position of a named output column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}
