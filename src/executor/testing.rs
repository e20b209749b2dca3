//! In-memory operator for unit tests

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::storage::StorageError;

use super::errors::{ExecutorError, ExecutorResult};
use super::operator::{Operator, OperatorKind, PlanNode};
use super::row::{Header, Row, Value};

/// Fixed rows behind the operator contract; counts resets.
pub struct Rows {
    header: Header,
    rows: Vec<Row>,
    cursor: usize,
    resets: Rc<Cell<usize>>,
    fail_at: Option<usize>,
}

impl Rows {
    pub fn new(columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            header: Header::new(columns.iter().map(|c| c.to_string()).collect()).unwrap(),
            rows: rows.into_iter().map(Row::new).collect(),
            cursor: 0,
            resets: Rc::new(Cell::new(0)),
            fail_at: None,
        }
    }

    /// Shared view of the reset count, readable after the operator is boxed
    pub fn reset_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.resets)
    }

    /// The pull that would return row `index` fails once
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }
}

impl Operator for Rows {
    fn header(&self) -> &Header {
        &self.header
    }

    fn next(&mut self) -> ExecutorResult<Row> {
        if self.fail_at == Some(self.cursor) {
            self.fail_at = None;
            let storage = StorageError::TableNotFound {
                path: PathBuf::from("rows"),
            };
            return Err(ExecutorError::scan_failed("rows", storage));
        }
        match self.rows.get(self.cursor) {
            Some(row) => {
                self.cursor += 1;
                Ok(row.clone())
            }
            None => Ok(Row::empty()),
        }
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.cursor = 0;
        self.resets.set(self.resets.get() + 1);
        Ok(())
    }

    fn explain(&self) -> PlanNode {
        let table = self
            .header
            .names()
            .first()
            .map(|c| crate::planner::qualifier(c).to_string())
            .unwrap_or_default();
        PlanNode::leaf(OperatorKind::Scan, table)
    }
}

/// Pulls until the sentinel
pub fn drain(op: &mut dyn Operator) -> Vec<Row> {
    let mut rows = Vec::new();
    loop {
        let row = op.next().unwrap();
        if row.is_empty() {
            return rows;
        }
        rows.push(row);
    }
}
