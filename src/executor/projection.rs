//! Column projection

use super::errors::ExecutorResult;
use super::operator::{BoxedOperator, Operator, OperatorKind, PlanNode};
use super::row::{Header, Row, Value};

/// Reorders and narrows the child's columns to a requested list.
pub struct Projection {
    child: BoxedOperator,
    header: Header,
    /// Child position of each output column
    columns: Vec<usize>,
}

impl Projection {
    /// Resolves every requested attribute in the child's header.
    ///
    /// Fails with `UnknownAttribute` if one is missing, or
    /// `DuplicateColumn` if one is requested twice.
    pub fn new(child: BoxedOperator, attributes: Vec<String>) -> ExecutorResult<Self> {
        let columns = attributes
            .iter()
            .map(|a| child.header().resolve(a))
            .collect::<ExecutorResult<Vec<usize>>>()?;
        let header = Header::new(attributes)?;
        Ok(Self {
            child,
            header,
            columns,
        })
    }
}

impl Operator for Projection {
    fn header(&self) -> &Header {
        &self.header
    }

    fn next(&mut self) -> ExecutorResult<Row> {
        let row = self.child.next()?;
        if row.is_empty() {
            return Ok(row);
        }

        let mut values = row.into_values();
        // Output names are unique, so each source position is taken once.
        let projected = self
            .columns
            .iter()
            .map(|&pos| std::mem::replace(&mut values[pos], Value::Int(0)))
            .collect();
        Ok(Row::new(projected))
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.child.reset()
    }

    fn explain(&self) -> PlanNode {
        PlanNode::with_children(
            OperatorKind::Projection,
            self.header.to_string(),
            vec![self.child.explain()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::{drain, Rows};

    fn joined() -> BoxedOperator {
        Box::new(Rows::new(
            &["A.id", "A.y", "B.x"],
            vec![
                vec![Value::Int(1), "y1".into(), "x1".into()],
                vec![Value::Int(2), "y2".into(), "x2".into()],
            ],
        ))
    }

    #[test]
    fn test_projection_reorders() {
        let mut proj = Projection::new(joined(), vec!["B.x".into(), "A.y".into()]).unwrap();
        assert_eq!(proj.header().names(), ["B.x", "A.y"]);

        let rows = drain(&mut proj);
        assert_eq!(rows[0].values(), [Value::from("x1"), Value::from("y1")]);
        assert_eq!(rows[1].values(), [Value::from("x2"), Value::from("y2")]);
    }

    #[test]
    fn test_projection_unknown_attribute() {
        let err = Projection::new(joined(), vec!["C.z".into()]).err().unwrap();
        assert_eq!(err.code().code(), "QUARRY_UNKNOWN_ATTRIBUTE");
        assert_eq!(err.attribute(), Some("C.z"));
    }

    #[test]
    fn test_projection_duplicate_rejected() {
        let err = Projection::new(joined(), vec!["A.y".into(), "A.y".into()]).err().unwrap();
        assert_eq!(err.code().code(), "QUARRY_DUPLICATE_COLUMN");
    }

    #[test]
    fn test_projection_exhaustion_and_reset() {
        let mut proj = Projection::new(joined(), vec!["A.id".into()]).unwrap();
        let first = drain(&mut proj);
        assert!(proj.next().unwrap().is_empty());
        proj.reset().unwrap();
        assert_eq!(drain(&mut proj), first);
    }

    #[test]
    fn test_projection_explain() {
        let proj = Projection::new(joined(), vec!["B.x".into(), "A.y".into()]).unwrap();
        let node = proj.explain();
        assert_eq!(node.kind, OperatorKind::Projection);
        assert_eq!(node.detail, "[B.x, A.y]");
    }
}
