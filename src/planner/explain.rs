//! Explain plan output
//!
//! Produces deterministic, human-readable explain output: one line per
//! operator, children indented two spaces under their parent.

use std::fmt;

use crate::executor::{Operator, PlanNode};

use super::errors::PlannerError;

/// Explain plan output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplainPlan {
    /// Operator tree of a constructed plan
    Accepted(PlanNode),
    /// Why planning failed
    Rejected {
        /// Error code
        code: String,
        /// Rejection reason
        reason: String,
    },
}

impl ExplainPlan {
    /// Captures the shape of a constructed plan
    pub fn from_operator(root: &dyn Operator) -> Self {
        ExplainPlan::Accepted(root.explain())
    }

    /// Creates an explain plan from a planning error
    pub fn from_error(err: &PlannerError) -> Self {
        ExplainPlan::Rejected {
            code: err.code().code().to_string(),
            reason: err.message().to_string(),
        }
    }

    /// Whether planning succeeded
    pub fn is_accepted(&self) -> bool {
        matches!(self, ExplainPlan::Accepted(_))
    }

    /// Root node of an accepted plan
    pub fn root(&self) -> Option<&PlanNode> {
        match self {
            ExplainPlan::Accepted(node) => Some(node),
            ExplainPlan::Rejected { .. } => None,
        }
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &PlanNode, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    if node.detail.is_empty() {
        writeln!(f, "{}{}", indent, node.kind)?;
    } else {
        writeln!(f, "{}{} {}", indent, node.kind, node.detail)?;
    }
    for child in &node.children {
        write_node(f, child, depth + 1)?;
    }
    Ok(())
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        match self {
            ExplainPlan::Accepted(root) => write_node(f, root, 0),
            ExplainPlan::Rejected { code, reason } => {
                writeln!(f, "Status: REJECTED")?;
                writeln!(f, "Error Code: {}", code)?;
                writeln!(f, "Reason: {}", reason)
            }
        }
    }
}
