//! Plan construction
//!
//! Turns a parsed query into a left-deep operator tree:
//!
//! 1. Constant predicates are pushed down onto their table's scan
//! 2. Tables are chained through join edges, scanning forward in FROM order
//!    and rewinding when an edge points back to an earlier table
//! 3. An edge between two tables already in the tree becomes a filter
//! 4. Tables unreachable through edges are attached by cross product
//! 5. An explicit SELECT list wraps the result in a projection
//!
//! Join edges at a table are taken in WHERE order, so the same query
//! always yields the same plan.

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::executor::{
    BoxedOperator, CrossProduct, DataSource, Filter, NestedLoopJoin, Operator, Projection,
};
use crate::observability::{log_event, Event, ObservationScope};

use super::ast::{FromPart, Predicate, Query, SelectClause};
use super::classify::{extract_joins, for_each_constant};
use super::errors::{PlannerError, PlannerResult};
use super::join_graph::JoinGraph;

/// One FROM table while its subtree is being assembled
struct Source {
    table: String,
    filter: Option<Predicate>,
    scan: Option<DataSource>,
}

impl Source {
    fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filter: None,
            scan: None,
        }
    }

    /// Folds `predicate` in as the left child of the accumulated filter
    fn push_filter(&mut self, predicate: Predicate) {
        self.filter = Some(match self.filter.take() {
            Some(previous) => Predicate::and(predicate, previous),
            None => predicate,
        });
    }

    /// The filtered scan; a source can only be finalized once
    fn finalize(&mut self) -> PlannerResult<BoxedOperator> {
        let scan = self.scan.take().ok_or_else(|| {
            PlannerError::query_invalid(format!("Table '{}' placed in the plan twice", self.table))
        })?;
        let scan: BoxedOperator = Box::new(scan);
        match self.filter.take() {
            Some(predicate) => Ok(Box::new(Filter::new(scan, predicate)?)),
            None => Ok(scan),
        }
    }
}

/// Builds operator trees for queries against one table directory.
pub struct PlanConstructor<'a> {
    config: &'a EngineConfig,
}

impl<'a> PlanConstructor<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Builds the plan for `query`.
    ///
    /// All-or-nothing: on error no operator is returned.
    pub fn create_plan(&self, query: &Query) -> PlannerResult<BoxedOperator> {
        let tables = query.from.len().to_string();
        let scope = ObservationScope::with_fields("PLAN", &[("tables", tables.as_str())]);

        match self.construct(query) {
            Ok(plan) => {
                let node = plan.explain();
                let operators = node.operator_count().to_string();
                let shape = node.shape();
                scope.complete_with_fields(&[
                    ("operators", operators.as_str()),
                    ("shape", shape.as_str()),
                ]);
                Ok(plan)
            }
            Err(err) => {
                scope.fail(err.code().code(), err.message());
                Err(err)
            }
        }
    }

    fn construct(&self, query: &Query) -> PlannerResult<BoxedOperator> {
        if query.from.is_empty() {
            return Err(PlannerError::query_invalid("FROM clause is empty"));
        }

        // Name -> FROM index, resolved once
        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(query.from.len());
        let mut sources = Vec::with_capacity(query.from.len());
        for part in &query.from {
            let table = match part {
                FromPart::Table(name) => name.as_str(),
                FromPart::Subquery(_) => return Err(PlannerError::unsupported("subquery in FROM")),
            };
            if index_of.insert(table, sources.len()).is_some() {
                return Err(PlannerError::unsupported(format!(
                    "table '{}' listed more than once in FROM",
                    table
                )));
            }
            sources.push(Source::new(table));
        }

        let joins = match &query.predicate {
            Some(predicate) => extract_joins(predicate)?,
            None => Vec::new(),
        };
        let mut graph = JoinGraph::build(&joins, &index_of, sources.len())?;

        if let Some(predicate) = &query.predicate {
            for_each_constant(predicate, &mut |constant| {
                let table = constant.table();
                let index = *index_of
                    .get(table)
                    .ok_or_else(|| PlannerError::no_source_for_predicate(table, constant))?;
                let rendered = constant.to_string();
                self.trace(
                    Event::FilterPushedDown,
                    &[("table", table), ("predicate", rendered.as_str())],
                );
                sources[index].push_filter(Predicate::Constant(constant.clone()));
                Ok(())
            })?;
        }

        for source in &mut sources {
            source.scan = Some(DataSource::for_table(&source.table, self.config)?);
        }

        let plan = self.order_joins(&mut sources, &mut graph)?;

        match &query.selection {
            SelectClause::List(attributes) if !attributes.is_empty() => {
                let columns = attributes.join(", ");
                self.trace(Event::ProjectionAdded, &[("columns", columns.as_str())]);
                Ok(Box::new(Projection::new(plan, attributes.clone())?))
            }
            _ => Ok(plan),
        }
    }

    /// Greedy left-deep ordering over the join graph
    fn order_joins(&self, sources: &mut [Source], graph: &mut JoinGraph<'_>) -> PlannerResult<BoxedOperator> {
        let n = sources.len();
        let mut visited = vec![false; n];

        let start = graph.start_index();
        let mut result = sources[start].finalize()?;
        visited[start] = true;
        let mut cursor = start;

        loop {
            while cursor < n {
                if !visited[cursor] {
                    cursor += 1;
                    continue;
                }
                let Some(id) = graph.next_edge(cursor) else {
                    cursor += 1;
                    continue;
                };

                let edge = graph.edge(id);
                let other = edge.other(cursor);

                if visited[other] {
                    let predicate = edge.predicate;
                    let rendered = predicate.to_string();
                    self.trace(Event::ResidualFilterAdded, &[("predicate", rendered.as_str())]);
                    result = Box::new(Filter::new(result, Predicate::Attribute(predicate.clone()))?);
                } else {
                    let (near, far, relation) = edge.oriented(cursor);
                    self.trace(
                        Event::JoinAdded,
                        &[
                            ("left", near),
                            ("relation", relation.symbol()),
                            ("right", far),
                            ("table", sources[other].table.as_str()),
                        ],
                    );
                    let inner = sources[other].finalize()?;
                    result = Box::new(NestedLoopJoin::new(result, inner, near, far, relation)?);
                    visited[other] = true;
                }

                graph.consume(id);
                if other < cursor {
                    cursor = other;
                }
            }

            let Some(next) = visited.iter().position(|v| !v) else {
                break;
            };
            self.trace(Event::CrossProductAdded, &[("table", sources[next].table.as_str())]);
            let inner = sources[next].finalize()?;
            result = Box::new(CrossProduct::new(result, inner)?);
            visited[next] = true;
            cursor = next;
        }

        Ok(result)
    }

    fn trace(&self, event: Event, fields: &[(&str, &str)]) {
        if self.config.trace_planning {
            log_event(event, fields);
        }
    }
}

/// Builds the plan for `query` with tables resolved through `config`.
pub fn create_plan(query: &Query, config: &EngineConfig) -> PlannerResult<BoxedOperator> {
    PlanConstructor::new(config).create_plan(query)
}
