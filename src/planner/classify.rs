//! Predicate classification
//!
//! Splits a WHERE tree into the join edges and the single-table filters the
//! planner places separately. Only conjunctions of constant and attribute
//! predicates are accepted; anything else is rejected.

use super::ast::{AttributePredicate, ConstantPredicate, Predicate};
use super::errors::{PlannerError, PlannerResult};

/// All attribute predicates of `predicate`, left to right.
///
/// A bare constant predicate yields nothing.
pub fn extract_joins(predicate: &Predicate) -> PlannerResult<Vec<&AttributePredicate>> {
    let mut joins = Vec::new();
    collect_joins(predicate, &mut joins)?;
    Ok(joins)
}

fn collect_joins<'p>(predicate: &'p Predicate, out: &mut Vec<&'p AttributePredicate>) -> PlannerResult<()> {
    match predicate {
        Predicate::Attribute(p) => out.push(p),
        Predicate::Constant(_) => {}
        Predicate::And(l, r) => {
            collect_joins(l, out)?;
            collect_joins(r, out)?;
        }
        Predicate::Or(_, _) => return Err(disjunction(predicate)),
    }
    Ok(())
}

/// Calls `visit` on every constant predicate of `predicate`, left to right.
///
/// Stops at the first error returned by `visit`.
pub fn for_each_constant<F>(predicate: &Predicate, visit: &mut F) -> PlannerResult<()>
where
    F: FnMut(&ConstantPredicate) -> PlannerResult<()>,
{
    match predicate {
        Predicate::Constant(p) => visit(p),
        Predicate::Attribute(_) => Ok(()),
        Predicate::And(l, r) => {
            for_each_constant(l, visit)?;
            for_each_constant(r, visit)
        }
        Predicate::Or(_, _) => Err(disjunction(predicate)),
    }
}

fn disjunction(predicate: &Predicate) -> PlannerError {
    PlannerError::unsupported(format!("disjunction {}", predicate))
}
