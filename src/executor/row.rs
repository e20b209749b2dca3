//! Row and header model shared by every operator

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::errors::{ExecutorError, ExecutorResult};

/// A single field value.
///
/// Values never coerce: an `Int` and a `Str` are incomparable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    /// Types a raw stored field: base-10 integers become `Int`.
    pub fn parse(field: &str) -> Self {
        match field.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Str(field.to_string()),
        }
    }

    /// Orders two values of the same type; `None` across types.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Ordered, unique column names with name→position lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    /// Builds a header, rejecting repeated names.
    pub fn new(names: Vec<String>) -> ExecutorResult<Self> {
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), i).is_some() {
                return Err(ExecutorError::duplicate_column(name));
            }
        }
        Ok(Self { names, positions })
    }

    /// Position of `name`, if present
    pub fn index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Position of `name`, or `UnknownAttribute`
    pub fn resolve(&self, name: &str) -> ExecutorResult<usize> {
        self.index(name)
            .ok_or_else(|| ExecutorError::unknown_attribute(name, &self.names))
    }

    /// Column names in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Header of `self` followed by `other`
    pub fn concat(&self, other: &Header) -> ExecutorResult<Header> {
        let mut names = Vec::with_capacity(self.len() + other.len());
        names.extend(self.names.iter().cloned());
        names.extend(other.names.iter().cloned());
        Header::new(names)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}

/// An ordered sequence of values matching some operator's header.
///
/// The empty row is the end-of-data sentinel returned by `Operator::next`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The end-of-data sentinel
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// True for the end-of-data sentinel
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// `self` followed by a copy of `other`
    pub fn concat(&self, other: &Row) -> Row {
        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend(self.values.iter().cloned());
        values.extend(other.values.iter().cloned());
        Row { values }
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, position: usize) -> &Value {
        &self.values[position]
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Header {
        Header::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_value_parse() {
        assert_eq!(Value::parse("42"), Value::Int(42));
        assert_eq!(Value::parse("-7"), Value::Int(-7));
        assert_eq!(Value::parse("4.2"), Value::Str("4.2".into()));
        assert_eq!(Value::parse("alice"), Value::Str("alice".into()));
        assert_eq!(Value::parse(""), Value::Str(String::new()));
    }

    #[test]
    fn test_value_compare_no_coercion() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Some(Ordering::Less));
        assert_eq!(Value::from("b").compare(&Value::from("a")), Some(Ordering::Greater));
        assert_eq!(Value::Int(1).compare(&Value::from("1")), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::from("o'neil").to_string(), "'o''neil'");
    }

    #[test]
    fn test_header_lookup() {
        let h = header(&["A.id", "A.name"]);
        assert_eq!(h.index("A.name"), Some(1));
        assert_eq!(h.index("A.age"), None);
        assert_eq!(h.resolve("A.id").unwrap(), 0);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn test_header_unknown_attribute() {
        let err = header(&["A.id"]).resolve("B.id").unwrap_err();
        assert_eq!(err.code().code(), "QUARRY_UNKNOWN_ATTRIBUTE");
        assert_eq!(err.attribute(), Some("B.id"));
    }

    #[test]
    fn test_header_rejects_duplicates() {
        let err = Header::new(vec!["A.id".into(), "A.id".into()]).unwrap_err();
        assert_eq!(err.code().code(), "QUARRY_DUPLICATE_COLUMN");
    }

    #[test]
    fn test_header_concat() {
        let joined = header(&["A.id"]).concat(&header(&["B.aid", "B.x"])).unwrap();
        assert_eq!(joined.names(), ["A.id", "B.aid", "B.x"]);
        assert_eq!(joined.index("B.x"), Some(2));
        assert!(header(&["A.id"]).concat(&header(&["A.id"])).is_err());
    }

    #[test]
    fn test_row_sentinel_and_concat() {
        assert!(Row::empty().is_empty());
        let row = Row::new(vec![Value::Int(1)]).concat(&Row::new(vec!["x".into()]));
        assert_eq!(row.values(), [Value::Int(1), Value::from("x")]);
        assert_eq!(row[1], Value::from("x"));
        assert!(!row.is_empty());
    }
}
