//! Observable planning events

use std::fmt;

/// Join-order decisions taken while turning a query into an operator tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A constant predicate was attached to its table's scan
    FilterPushedDown,
    /// A table was joined into the plan through a join edge
    JoinAdded,
    /// A join edge between two incorporated tables became a filter
    ResidualFilterAdded,
    /// A disconnected table was attached by cross product
    CrossProductAdded,
    /// The plan was wrapped in a projection
    ProjectionAdded,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FilterPushedDown => "FILTER_PUSHED_DOWN",
            Event::JoinAdded => "JOIN_ADDED",
            Event::ResidualFilterAdded => "RESIDUAL_FILTER_ADDED",
            Event::CrossProductAdded => "CROSS_PRODUCT_ADDED",
            Event::ProjectionAdded => "PROJECTION_ADDED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
