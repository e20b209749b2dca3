//! Row filter

use crate::planner::Predicate;

use super::errors::ExecutorResult;
use super::filters::BoundPredicate;
use super::operator::{BoxedOperator, Operator, OperatorKind, PlanNode};
use super::row::{Header, Row};

/// Passes through the child's rows that satisfy a predicate.
///
/// Exposes the child's header unchanged.
pub struct Filter {
    child: BoxedOperator,
    predicate: Predicate,
    bound: BoundPredicate,
}

impl Filter {
    /// Binds `predicate` against the child's header.
    pub fn new(child: BoxedOperator, predicate: Predicate) -> ExecutorResult<Self> {
        let bound = BoundPredicate::bind(&predicate, child.header())?;
        Ok(Self {
            child,
            predicate,
            bound,
        })
    }
}

impl Operator for Filter {
    fn header(&self) -> &Header {
        self.child.header()
    }

    fn next(&mut self) -> ExecutorResult<Row> {
        loop {
            let row = self.child.next()?;
            if row.is_empty() || self.bound.matches(&row) {
                return Ok(row);
            }
        }
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.child.reset()
    }

    fn explain(&self) -> PlanNode {
        PlanNode::with_children(
            OperatorKind::Filter,
            self.predicate.to_string(),
            vec![self.child.explain()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::{drain, Rows};
    use crate::executor::Value;
    use crate::planner::Relation;

    fn numbers() -> BoxedOperator {
        Box::new(Rows::new(
            &["T.n", "T.s"],
            vec![
                vec![Value::Int(1), "a".into()],
                vec![Value::Int(2), "b".into()],
                vec![Value::Int(3), "a".into()],
                vec![Value::Int(4), "b".into()],
            ],
        ))
    }

    #[test]
    fn test_filter_keeps_matching_rows() {
        let mut filter = Filter::new(numbers(), Predicate::constant("T.s", Relation::Eq, "a")).unwrap();
        let rows = drain(&mut filter);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::Int(1));
        assert_eq!(rows[1][0], Value::Int(3));
    }

    #[test]
    fn test_filter_shares_child_header() {
        let filter = Filter::new(numbers(), Predicate::constant("T.n", Relation::Gt, 0)).unwrap();
        assert_eq!(filter.header().names(), ["T.n", "T.s"]);
    }

    #[test]
    fn test_filter_nothing_matches() {
        let mut filter = Filter::new(numbers(), Predicate::constant("T.n", Relation::Gt, 10)).unwrap();
        assert!(filter.next().unwrap().is_empty());
        assert!(filter.next().unwrap().is_empty());
    }

    #[test]
    fn test_filter_reset_repeats() {
        let mut filter = Filter::new(numbers(), Predicate::constant("T.n", Relation::Le, 2)).unwrap();
        let first = drain(&mut filter);
        filter.reset().unwrap();
        assert_eq!(drain(&mut filter), first);
    }

    #[test]
    fn test_filter_unknown_attribute() {
        let result = Filter::new(numbers(), Predicate::constant("T.zzz", Relation::Eq, 1));
        assert_eq!(result.err().unwrap().code().code(), "QUARRY_UNKNOWN_ATTRIBUTE");
    }

    #[test]
    fn test_filter_explain() {
        let filter = Filter::new(numbers(), Predicate::constant("T.n", Relation::Eq, 1)).unwrap();
        assert_eq!(filter.explain().shape(), "Filter(Scan(T))");
        assert_eq!(filter.explain().detail, "T.n = 1");
    }
}
