//! Planner error types
//!
//! Error codes:
//! - QUARRY_QUERY_INVALID (REJECT)
//! - QUARRY_UNSUPPORTED_QUERY_CONSTRUCT (REJECT)
//! - QUARRY_NO_SOURCE_FOR_PREDICATE (REJECT)
//! - QUARRY_UNKNOWN_ATTRIBUTE (REJECT)
//! - QUARRY_SCAN_FAILED (ERROR)
//!
//! Planning is all-or-nothing: any of these aborts construction and no
//! partial plan is returned.

use std::fmt;

use crate::executor::{ExecutorError, ExecutorErrorCode};

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected as written
    Reject,
    /// Table storage could not be read
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Malformed query structure
    QueryInvalid,
    /// Subquery, disjunction or repeated FROM table
    UnsupportedQueryConstruct,
    /// Predicate qualifier matches no FROM table
    NoSourceForPredicate,
    /// SELECT or join attribute missing from its header
    UnknownAttribute,
    /// A base table could not be opened or read
    ScanFailed,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::QueryInvalid => "QUARRY_QUERY_INVALID",
            PlannerErrorCode::UnsupportedQueryConstruct => "QUARRY_UNSUPPORTED_QUERY_CONSTRUCT",
            PlannerErrorCode::NoSourceForPredicate => "QUARRY_NO_SOURCE_FOR_PREDICATE",
            PlannerErrorCode::UnknownAttribute => "QUARRY_UNKNOWN_ATTRIBUTE",
            PlannerErrorCode::ScanFailed => "QUARRY_SCAN_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            PlannerErrorCode::ScanFailed => Severity::Error,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug)]
pub struct PlannerError {
    /// Error code
    code: PlannerErrorCode,
    /// Human-readable message
    message: String,
    /// Attribute or table name if applicable
    subject: Option<String>,
    /// Executor failure raised while building operators
    source: Option<ExecutorError>,
}

impl PlannerError {
    fn new(code: PlannerErrorCode, message: String, subject: Option<String>) -> Self {
        Self {
            code,
            message,
            subject,
            source: None,
        }
    }

    /// Create a query invalid error
    pub fn query_invalid(reason: impl Into<String>) -> Self {
        Self::new(PlannerErrorCode::QueryInvalid, reason.into(), None)
    }

    /// Create an unsupported construct error
    pub fn unsupported(construct: impl Into<String>) -> Self {
        let construct = construct.into();
        Self::new(
            PlannerErrorCode::UnsupportedQueryConstruct,
            format!("Unsupported query construct: {}", construct),
            None,
        )
    }

    /// Create a missing source error for a predicate
    pub fn no_source_for_predicate(table: impl Into<String>, predicate: &dyn fmt::Display) -> Self {
        let table = table.into();
        Self::new(
            PlannerErrorCode::NoSourceForPredicate,
            format!("No FROM table '{}' for predicate {}", table, predicate),
            Some(table),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the attribute or table name if applicable
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the executor error this was raised from
    pub fn executor_error(&self) -> Option<&ExecutorError> {
        self.source.as_ref()
    }
}

impl From<ExecutorError> for PlannerError {
    fn from(err: ExecutorError) -> Self {
        let code = match err.code() {
            ExecutorErrorCode::UnknownAttribute => PlannerErrorCode::UnknownAttribute,
            ExecutorErrorCode::DuplicateColumn => PlannerErrorCode::QueryInvalid,
            ExecutorErrorCode::ScanFailed => PlannerErrorCode::ScanFailed,
        };
        Self {
            code,
            message: err.message().to_string(),
            subject: err.attribute().map(str::to_string),
            source: Some(err),
        }
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
