//! Predicate evaluation against rows
//!
//! Evaluation is pure and total: every predicate yields `true` or `false`
//! for every row of the header it was bound to. No coercion between types.

use crate::planner::{Predicate, Relation};

use super::errors::ExecutorResult;
use super::row::{Header, Row, Value};

/// A predicate whose attribute names have been resolved to positions.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundPredicate {
    Constant {
        position: usize,
        relation: Relation,
        value: Value,
    },
    Attribute {
        left: usize,
        right: usize,
        relation: Relation,
    },
    And(Box<BoundPredicate>, Box<BoundPredicate>),
    Or(Box<BoundPredicate>, Box<BoundPredicate>),
}

impl BoundPredicate {
    /// Resolves every attribute of `predicate` in `header`.
    pub fn bind(predicate: &Predicate, header: &Header) -> ExecutorResult<Self> {
        Ok(match predicate {
            Predicate::Constant(p) => BoundPredicate::Constant {
                position: header.resolve(&p.attribute)?,
                relation: p.relation,
                value: p.value.clone(),
            },
            Predicate::Attribute(p) => BoundPredicate::Attribute {
                left: header.resolve(&p.left)?,
                right: header.resolve(&p.right)?,
                relation: p.relation,
            },
            Predicate::And(l, r) => BoundPredicate::And(
                Box::new(Self::bind(l, header)?),
                Box::new(Self::bind(r, header)?),
            ),
            Predicate::Or(l, r) => BoundPredicate::Or(
                Box::new(Self::bind(l, header)?),
                Box::new(Self::bind(r, header)?),
            ),
        })
    }

    /// Whether `row` satisfies the predicate
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            BoundPredicate::Constant {
                position,
                relation,
                value,
            } => row
                .get(*position)
                .is_some_and(|actual| relation.holds(actual, value)),
            BoundPredicate::Attribute {
                left,
                right,
                relation,
            } => match (row.get(*left), row.get(*right)) {
                (Some(l), Some(r)) => relation.holds(l, r),
                _ => false,
            },
            BoundPredicate::And(l, r) => l.matches(row) && r.matches(row),
            BoundPredicate::Or(l, r) => l.matches(row) || r.matches(row),
        }
    }
}

/// One-shot evaluation without keeping the binding
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if `row`, laid out per `header`, satisfies `predicate`
    pub fn matches(predicate: &Predicate, header: &Header, row: &Row) -> ExecutorResult<bool> {
        Ok(BoundPredicate::bind(predicate, header)?.matches(row))
    }
}
