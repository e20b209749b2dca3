//! Query executor for quarry
//!
//! Plans are trees of pull-based operators. Every operator exposes a fixed
//! header and yields rows on `next` until the empty row signals exhaustion.
//!
//! # Operators
//!
//! - `DataSource`: scan of one stored table
//! - `Filter`: predicate over the child's rows
//! - `Projection`: column selection and reordering
//! - `NestedLoopJoin`: attribute comparison between two inputs
//! - `CrossProduct`: every pairing of two inputs
//!
//! # Invariants
//!
//! - Output order is deterministic: outer-major for binary operators,
//!   file order for scans
//! - Values never coerce between integer and string
//! - Storage failures surface as `QUARRY_SCAN_FAILED` with the cause kept

mod datasource;
mod errors;
mod filter;
mod filters;
mod join;
mod operator;
mod projection;
mod result;
mod row;

#[cfg(test)]
mod testing;

pub use datasource::DataSource;
pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult};
pub use filter::Filter;
pub use filters::{BoundPredicate, PredicateFilter};
pub use join::{CrossProduct, NestedLoopJoin};
pub use operator::{BoxedOperator, Operator, OperatorKind, PlanNode};
pub use projection::Projection;
pub use result::ResultSet;
pub use row::{Header, Row, Value};
