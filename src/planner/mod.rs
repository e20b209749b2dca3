//! Query planner for quarry
//!
//! Turns a parsed SELECT-FROM-WHERE query into a tree of executor
//! operators.
//!
//! # Design Principles
//!
//! - Deterministic: the same query always yields the same plan
//! - Pushdown: single-table filters sit directly on their table's scan
//! - Left-deep: each join adds one table on the inner side
//! - All-or-nothing: a query is planned completely or rejected
//!
//! Only conjunctions of constant and attribute comparisons are planned.
//! Subqueries and disjunctions are rejected, not rewritten.

mod ast;
mod classify;
mod constructor;
mod errors;
mod explain;
mod join_graph;

pub use ast::{
    qualifier, AttributePredicate, ConstantPredicate, FromPart, Predicate, Query, Relation,
    SelectClause,
};
pub use classify::{extract_joins, for_each_constant};
pub use constructor::{create_plan, PlanConstructor};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::ExplainPlan;
pub use join_graph::{JoinEdge, JoinGraph};
