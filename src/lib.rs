//! quarry - query planning core of a minimal relational engine
//!
//! A parsed SELECT-FROM-WHERE query goes in, a tree of pull-based
//! operators over CSV tables comes out:
//!
//! ```ignore
//! use quarry::config::EngineConfig;
//! use quarry::executor::ResultSet;
//! use quarry::planner::{create_plan, Predicate, Query};
//!
//! let config = EngineConfig::with_tables_dir("tables");
//! let query = Query::new()
//!     .from_table("A")
//!     .from_table("B")
//!     .with_where(Predicate::attr_eq("A.id", "B.aid"))
//!     .select(["B.x", "A.y"]);
//!
//! let mut plan = create_plan(&query, &config)?;
//! let result = ResultSet::collect(plan.as_mut())?;
//! ```

pub mod config;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod storage;
