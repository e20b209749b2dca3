//! Join graph over FROM-clause sources
//!
//! Sources are addressed by their FROM index. Each join edge is registered
//! at both endpoints and removed from both the moment it is consumed, so
//! every edge reaches the plan exactly once.

use std::collections::{BTreeSet, HashMap};

use super::ast::{AttributePredicate, Relation};
use super::errors::{PlannerError, PlannerResult};

/// One attribute predicate between two sources
#[derive(Debug)]
pub struct JoinEdge<'q> {
    pub predicate: &'q AttributePredicate,
    pub left: usize,
    pub right: usize,
}

impl JoinEdge<'_> {
    /// The endpoint opposite `from`
    pub fn other(&self, from: usize) -> usize {
        if from == self.left {
            self.right
        } else {
            self.left
        }
    }

    /// `(near_attribute, far_attribute, relation)` as seen from `from`.
    ///
    /// The relation is flipped when `from` is the right-hand table so that
    /// `near relation far` keeps the meaning of the predicate.
    pub fn oriented(&self, from: usize) -> (&str, &str, Relation) {
        let p = self.predicate;
        if from == self.left {
            (p.left.as_str(), p.right.as_str(), p.relation)
        } else {
            (p.right.as_str(), p.left.as_str(), p.relation.flip())
        }
    }
}

/// Remaining join edges per source.
pub struct JoinGraph<'q> {
    edges: Vec<JoinEdge<'q>>,
    /// Unconsumed edge ids per source, in insertion order
    incident: Vec<BTreeSet<usize>>,
}

impl<'q> JoinGraph<'q> {
    /// Registers every join under both of its tables.
    ///
    /// Fails with `NoSourceForPredicate` if either table is not in
    /// `index_of`.
    pub fn build(
        joins: &[&'q AttributePredicate],
        index_of: &HashMap<&str, usize>,
        sources: usize,
    ) -> PlannerResult<Self> {
        let mut edges = Vec::with_capacity(joins.len());
        let mut incident = vec![BTreeSet::new(); sources];

        for (id, &predicate) in joins.iter().enumerate() {
            let lookup = |table: &str| {
                index_of
                    .get(table)
                    .copied()
                    .ok_or_else(|| PlannerError::no_source_for_predicate(table, predicate))
            };
            let left = lookup(&predicate.left_table)?;
            let right = lookup(&predicate.right_table)?;

            incident[left].insert(id);
            incident[right].insert(id);
            edges.push(JoinEdge {
                predicate,
                left,
                right,
            });
        }

        Ok(Self { edges, incident })
    }

    /// Lowest source index touched by any join, or 0 without joins
    pub fn start_index(&self) -> usize {
        self.edges
            .iter()
            .map(|e| e.left.min(e.right))
            .min()
            .unwrap_or(0)
    }

    /// First unconsumed edge at `source`
    pub fn next_edge(&self, source: usize) -> Option<usize> {
        self.incident[source].iter().next().copied()
    }

    pub fn edge(&self, id: usize) -> &JoinEdge<'q> {
        &self.edges[id]
    }

    /// Whether `source` still has unconsumed edges
    #[cfg(test)]
    fn has_edges(&self, source: usize) -> bool {
        !self.incident[source].is_empty()
    }

    /// Removes edge `id` from both endpoints
    pub fn consume(&mut self, id: usize) {
        let (left, right) = (self.edges[id].left, self.edges[id].right);
        self.incident[left].remove(&id);
        self.incident[right].remove(&id);
    }

    /// Number of edges not yet consumed
    #[cfg(test)]
    fn remaining(&self) -> usize {
        let mut ids: BTreeSet<usize> = BTreeSet::new();
        for set in &self.incident {
            ids.extend(set.iter().copied());
        }
        ids.len()
    }
}
