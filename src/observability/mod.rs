//! Observability for quarry
//!
//! - Structured logging (JSON lines, deterministic key order)
//! - Typed planning events
//! - Begin/complete scopes
//!
//! Logging is read-only with respect to planning: nothing here can change
//! the plan that gets built.
//!
//! ```ignore
//! use quarry::observability::{log_event, Event};
//!
//! log_event(Event::JoinAdded, &[("left", "A.id"), ("right", "B.aid")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a planning event at TRACE
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(Severity::Trace, event.as_str(), fields);
}
