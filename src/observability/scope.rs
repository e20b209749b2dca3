//! Begin/complete logging around a unit of work

use super::logger::Logger;

/// Logs `{name}_BEGIN` on creation and exactly one of `{name}_COMPLETE`,
/// `{name}_FAILED` or `{name}_INCOMPLETE` when it ends.
///
/// ```ignore
/// let scope = ObservationScope::new("PLAN");
/// // ... do work ...
/// scope.complete_with_fields(&[("operators", "4")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    finished: bool,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObservationScope<'a> {
    /// Opens a scope with no fields
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Opens a scope whose fields are repeated on the closing line
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);
        Self {
            name,
            finished: false,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    /// Closes the scope successfully, adding `extra` fields
    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.finished = true;
        let mut all: Vec<(&str, &str)> = self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all.extend_from_slice(extra);
        Logger::info(&format!("{}_COMPLETE", self.name), &all);
    }

    /// Closes the scope successfully
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Closes the scope as failed
    pub fn fail(mut self, code: &str, reason: &str) {
        self.finished = true;
        let mut all: Vec<(&str, &str)> = self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all.push(("code", code));
        all.push(("reason", reason));
        Logger::error(&format!("{}_FAILED", self.name), &all);
    }

    /// Whether the scope has been closed
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_open() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_finished());
        scope.complete();
    }

    #[test]
    fn test_scope_with_fields() {
        let scope = ObservationScope::with_fields("TEST", &[("tables", "2")]);
        scope.complete_with_fields(&[("operators", "3")]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("QUARRY_QUERY_INVALID", "empty FROM clause");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }
}
