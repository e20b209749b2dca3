//! Binary row combinators
//!
//! Both operators drive the left input as the outer loop and rescan the
//! right input once per outer row. Output rows are the outer row followed
//! by the inner row, so the header is the left header then the right one.

use crate::planner::Relation;

use super::errors::ExecutorResult;
use super::operator::{BoxedOperator, Operator, OperatorKind, PlanNode};
use super::row::{Header, Row};

/// Shared outer/inner iteration state
struct Pairing {
    left: BoxedOperator,
    right: BoxedOperator,
    header: Header,
    outer: Option<Row>,
    done: bool,
}

impl Pairing {
    fn new(left: BoxedOperator, right: BoxedOperator) -> ExecutorResult<Self> {
        let header = left.header().concat(right.header())?;
        Ok(Self {
            left,
            right,
            header,
            outer: None,
            done: false,
        })
    }

    /// Next (outer, inner) pair whose rows satisfy `accept`
    fn next_where(&mut self, accept: impl Fn(&Row, &Row) -> bool) -> ExecutorResult<Row> {
        if self.done {
            return Ok(Row::empty());
        }

        loop {
            let outer = match self.outer.take() {
                Some(row) => row,
                None => {
                    let row = self.left.next()?;
                    if row.is_empty() {
                        self.done = true;
                        return Ok(row);
                    }
                    row
                }
            };

            // The outer row is put back on error so a later pull resumes it
            let inner = match self.right.next() {
                Ok(row) => row,
                Err(err) => {
                    self.outer = Some(outer);
                    return Err(err);
                }
            };
            if inner.is_empty() {
                // Inner exhausted for this outer row
                if let Err(err) = self.right.reset() {
                    self.outer = Some(outer);
                    return Err(err);
                }
                continue;
            }

            let matched = accept(&outer, &inner);
            let row = if matched { Some(outer.concat(&inner)) } else { None };
            self.outer = Some(outer);
            if let Some(row) = row {
                return Ok(row);
            }
        }
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.left.reset()?;
        self.right.reset()?;
        self.outer = None;
        self.done = false;
        Ok(())
    }
}

/// Nested-loop join on a single attribute comparison.
pub struct NestedLoopJoin {
    pairing: Pairing,
    left_attr: String,
    right_attr: String,
    relation: Relation,
    left_pos: usize,
    right_pos: usize,
}

impl NestedLoopJoin {
    /// Joins rows where `left_attr` (resolved in the left input) stands in
    /// `relation` to `right_attr` (resolved in the right input).
    pub fn new(
        left: BoxedOperator,
        right: BoxedOperator,
        left_attr: impl Into<String>,
        right_attr: impl Into<String>,
        relation: Relation,
    ) -> ExecutorResult<Self> {
        let left_attr = left_attr.into();
        let right_attr = right_attr.into();
        let left_pos = left.header().resolve(&left_attr)?;
        let right_pos = right.header().resolve(&right_attr)?;
        Ok(Self {
            pairing: Pairing::new(left, right)?,
            left_attr,
            right_attr,
            relation,
            left_pos,
            right_pos,
        })
    }

    /// Join condition as written in explain output
    pub fn condition(&self) -> String {
        format!("{} {} {}", self.left_attr, self.relation, self.right_attr)
    }
}

impl Operator for NestedLoopJoin {
    fn header(&self) -> &Header {
        &self.pairing.header
    }

    fn next(&mut self) -> ExecutorResult<Row> {
        let (lp, rp, relation) = (self.left_pos, self.right_pos, self.relation);
        self.pairing.next_where(|outer, inner| match (outer.get(lp), inner.get(rp)) {
            (Some(l), Some(r)) => relation.holds(l, r),
            _ => false,
        })
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.pairing.reset()
    }

    fn explain(&self) -> PlanNode {
        PlanNode::with_children(
            OperatorKind::NestedLoopJoin,
            self.condition(),
            vec![self.pairing.left.explain(), self.pairing.right.explain()],
        )
    }
}

/// Unconditional pairing of every left row with every right row.
pub struct CrossProduct {
    pairing: Pairing,
}

impl CrossProduct {
    pub fn new(left: BoxedOperator, right: BoxedOperator) -> ExecutorResult<Self> {
        Ok(Self {
            pairing: Pairing::new(left, right)?,
        })
    }
}

impl Operator for CrossProduct {
    fn header(&self) -> &Header {
        &self.pairing.header
    }

    fn next(&mut self) -> ExecutorResult<Row> {
        self.pairing.next_where(|_, _| true)
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.pairing.reset()
    }

    fn explain(&self) -> PlanNode {
        PlanNode::with_children(
            OperatorKind::CrossProduct,
            "",
            vec![self.pairing.left.explain(), self.pairing.right.explain()],
        )
    }
}
