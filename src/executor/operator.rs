//! Pull-based operator contract

use std::fmt;

use super::errors::ExecutorResult;
use super::row::{Header, Row};

/// A node of the plan tree.
///
/// Callers pull rows with `next` until it returns the empty row, and may
/// then `reset` to iterate again from the start. After exhaustion `next`
/// keeps returning the empty row until `reset` is called.
pub trait Operator {
    /// Output schema, fixed for the operator's lifetime
    fn header(&self) -> &Header;

    /// Next row, or `Row::empty()` once exhausted
    fn next(&mut self) -> ExecutorResult<Row>;

    /// Restart iteration from the beginning
    fn reset(&mut self) -> ExecutorResult<()>;

    /// Structural description of this operator and its inputs
    fn explain(&self) -> PlanNode;
}

/// Owned plan tree
pub type BoxedOperator = Box<dyn Operator>;

/// Operator kinds as they appear in explain output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Scan,
    Filter,
    Projection,
    NestedLoopJoin,
    CrossProduct,
}

impl OperatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorKind::Scan => "Scan",
            OperatorKind::Filter => "Filter",
            OperatorKind::Projection => "Projection",
            OperatorKind::NestedLoopJoin => "NestedLoopJoin",
            OperatorKind::CrossProduct => "CrossProduct",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of one operator's shape, detached from the live tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanNode {
    pub kind: OperatorKind,
    /// Kind-specific detail: table name, predicate, join condition or column list
    pub detail: String,
    pub children: Vec<PlanNode>,
}

impl PlanNode {
    pub fn leaf(kind: OperatorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: OperatorKind, detail: impl Into<String>, children: Vec<PlanNode>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            children,
        }
    }

    /// Number of operators in this subtree
    pub fn operator_count(&self) -> usize {
        1 + self.children.iter().map(PlanNode::operator_count).sum::<usize>()
    }

    /// Compact one-line form, e.g. `NestedLoopJoin(Scan(A), Scan(B))`
    pub fn shape(&self) -> String {
        if self.children.is_empty() {
            format!("{}({})", self.kind, self.detail)
        } else {
            let inner: Vec<String> = self.children.iter().map(PlanNode::shape).collect();
            format!("{}({})", self.kind, inner.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_count() {
        let node = PlanNode::with_children(
            OperatorKind::CrossProduct,
            "",
            vec![
                PlanNode::leaf(OperatorKind::Scan, "A"),
                PlanNode::with_children(
                    OperatorKind::Filter,
                    "B.x = 1",
                    vec![PlanNode::leaf(OperatorKind::Scan, "B")],
                ),
            ],
        );
        assert_eq!(node.shape(), "CrossProduct(Scan(A), Filter(Scan(B)))");
        assert_eq!(node.operator_count(), 4);
    }
}
