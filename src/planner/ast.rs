//! Parsed query representation consumed by the planner
//!
//! Produced by an external SQL parser (or deserialized from JSON). Predicate
//! trees are immutable: combinators wrap existing nodes, never edit them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::executor::Value;

/// Comparison relations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl Relation {
    /// SQL symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::Ne => "<>",
            Relation::Lt => "<",
            Relation::Le => "<=",
            Relation::Gt => ">",
            Relation::Ge => ">=",
        }
    }

    /// The relation that holds for `(b, a)` exactly when `self` holds for `(a, b)`
    pub fn flip(&self) -> Relation {
        match self {
            Relation::Lt => Relation::Gt,
            Relation::Le => Relation::Ge,
            Relation::Gt => Relation::Lt,
            Relation::Ge => Relation::Le,
            other => *other,
        }
    }

    /// Evaluates `lhs <relation> rhs`; values of different types never satisfy it
    pub fn holds(&self, lhs: &Value, rhs: &Value) -> bool {
        let Some(ord) = lhs.compare(rhs) else {
            return false;
        };
        match self {
            Relation::Eq => ord.is_eq(),
            Relation::Ne => ord.is_ne(),
            Relation::Lt => ord.is_lt(),
            Relation::Le => ord.is_le(),
            Relation::Gt => ord.is_gt(),
            Relation::Ge => ord.is_ge(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Table qualifier of `table.column`: everything before the first `.`
pub fn qualifier(attribute: &str) -> &str {
    attribute.split('.').next().unwrap_or(attribute)
}

/// `table.column <relation> literal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantPredicate {
    /// Qualified attribute name
    pub attribute: String,
    pub relation: Relation,
    pub value: Value,
}

impl ConstantPredicate {
    pub fn new(attribute: impl Into<String>, relation: Relation, value: impl Into<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            relation,
            value: value.into(),
        }
    }

    /// Table owning the attribute
    pub fn table(&self) -> &str {
        qualifier(&self.attribute)
    }
}

impl fmt::Display for ConstantPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.relation, self.value)
    }
}

/// `left_table.x <relation> right_table.y`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePredicate {
    pub left_table: String,
    /// Qualified left attribute
    pub left: String,
    pub right_table: String,
    /// Qualified right attribute
    pub right: String,
    pub relation: Relation,
}

impl AttributePredicate {
    /// Builds the predicate, taking both tables from the attribute qualifiers.
    pub fn new(left: impl Into<String>, right: impl Into<String>, relation: Relation) -> Self {
        let left = left.into();
        let right = right.into();
        Self {
            left_table: qualifier(&left).to_string(),
            right_table: qualifier(&right).to_string(),
            left,
            right,
            relation,
        }
    }

    /// Equality between two attributes
    pub fn eq(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, right, Relation::Eq)
    }
}

impl fmt::Display for AttributePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.relation, self.right)
    }
}

/// WHERE-clause condition tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Constant(ConstantPredicate),
    Attribute(AttributePredicate),
    And(Box<Predicate>, Box<Predicate>),
    /// Representable so parsed input round-trips; the planner rejects it
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// `attribute <relation> value`
    pub fn constant(attribute: impl Into<String>, relation: Relation, value: impl Into<Value>) -> Self {
        Predicate::Constant(ConstantPredicate::new(attribute, relation, value))
    }

    /// `left = right` across two attributes
    pub fn attr_eq(left: impl Into<String>, right: impl Into<String>) -> Self {
        Predicate::Attribute(AttributePredicate::eq(left, right))
    }

    /// Conjunction owning both sides
    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    /// Disjunction owning both sides
    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    /// Left-deep conjunction of `parts` in order; `None` if empty
    pub fn conjunction(parts: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        parts.into_iter().reduce(Predicate::and)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Constant(p) => write!(f, "{}", p),
            Predicate::Attribute(p) => write!(f, "{}", p),
            Predicate::And(l, r) => write!(f, "({} AND {})", l, r),
            Predicate::Or(l, r) => write!(f, "({} OR {})", l, r),
        }
    }
}

impl From<ConstantPredicate> for Predicate {
    fn from(p: ConstantPredicate) -> Self {
        Predicate::Constant(p)
    }
}

impl From<AttributePredicate> for Predicate {
    fn from(p: AttributePredicate) -> Self {
        Predicate::Attribute(p)
    }
}

/// One entry of the FROM clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FromPart {
    Table(String),
    Subquery(Box<Query>),
}

/// SELECT clause
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectClause {
    /// `SELECT *`
    #[default]
    All,
    /// Qualified attribute names in output order
    List(Vec<String>),
}

/// Parsed SELECT-FROM-WHERE query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub selection: SelectClause,
    pub from: Vec<FromPart>,
    #[serde(default, rename = "where")]
    pub predicate: Option<Predicate>,
}

impl Query {
    /// `SELECT *` with an empty FROM list
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a base table to FROM
    pub fn from_table(mut self, table: impl Into<String>) -> Self {
        self.from.push(FromPart::Table(table.into()));
        self
    }

    /// Appends a subquery to FROM
    pub fn from_subquery(mut self, query: Query) -> Self {
        self.from.push(FromPart::Subquery(Box::new(query)));
        self
    }

    /// Replaces the WHERE clause
    pub fn with_where(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// ANDs `predicate` onto the WHERE clause
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => Predicate::and(existing, predicate),
            None => predicate,
        });
        self
    }

    /// Sets an explicit SELECT list
    pub fn select<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = SelectClause::List(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets `SELECT *`
    pub fn select_all(mut self) -> Self {
        self.selection = SelectClause::All;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier() {
        assert_eq!(qualifier("A.id"), "A");
        assert_eq!(qualifier("A.b.c"), "A");
        assert_eq!(qualifier("noqualifier"), "noqualifier");
        assert_eq!(qualifier(".x"), "");
    }

    #[test]
    fn test_relation_holds() {
        let one = Value::Int(1);
        let two = Value::Int(2);
        assert!(Relation::Lt.holds(&one, &two));
        assert!(Relation::Le.holds(&one, &one));
        assert!(Relation::Ne.holds(&one, &two));
        assert!(!Relation::Gt.holds(&one, &two));
        assert!(Relation::Ge.holds(&two, &one));
        assert!(Relation::Eq.holds(&Value::from("x"), &Value::from("x")));
    }

    #[test]
    fn test_relation_never_coerces() {
        let n = Value::Int(5);
        let s = Value::from("5");
        for rel in [Relation::Eq, Relation::Ne, Relation::Lt, Relation::Le, Relation::Gt, Relation::Ge] {
            assert!(!rel.holds(&n, &s), "{} held across types", rel);
        }
    }

    #[test]
    fn test_relation_flip() {
        let (a, b) = (Value::Int(1), Value::Int(9));
        for rel in [Relation::Eq, Relation::Ne, Relation::Lt, Relation::Le, Relation::Gt, Relation::Ge] {
            assert_eq!(rel.holds(&a, &b), rel.flip().holds(&b, &a));
        }
    }

    #[test]
    fn test_attribute_predicate_tables() {
        let p = AttributePredicate::eq("A.id", "B.aid");
        assert_eq!(p.left_table, "A");
        assert_eq!(p.right_table, "B");
        assert_eq!(p.to_string(), "A.id = B.aid");
    }

    #[test]
    fn test_predicate_display() {
        let p = Predicate::and(
            Predicate::constant("T.a", Relation::Eq, 5),
            Predicate::or(
                Predicate::constant("T.b", Relation::Ne, "x"),
                Predicate::attr_eq("T.a", "U.a"),
            ),
        );
        assert_eq!(p.to_string(), "(T.a = 5 AND (T.b <> 'x' OR T.a = U.a))");
    }

    #[test]
    fn test_conjunction_is_left_deep() {
        let p = Predicate::conjunction([
            Predicate::constant("T.a", Relation::Eq, 1),
            Predicate::constant("T.b", Relation::Eq, 2),
            Predicate::constant("T.c", Relation::Eq, 3),
        ])
        .unwrap();
        assert_eq!(p.to_string(), "((T.a = 1 AND T.b = 2) AND T.c = 3)");
        assert!(Predicate::conjunction(Vec::new()).is_none());
    }

    #[test]
    fn test_query_builder() {
        let q = Query::new()
            .from_table("A")
            .from_table("B")
            .with_where(Predicate::attr_eq("A.id", "B.aid"))
            .and_where(Predicate::constant("A.x", Relation::Gt, 3))
            .select(["A.x", "B.y"]);

        assert_eq!(q.from, vec![FromPart::Table("A".into()), FromPart::Table("B".into())]);
        assert_eq!(q.selection, SelectClause::List(vec!["A.x".into(), "B.y".into()]));
        assert_eq!(
            q.predicate.as_ref().map(|p| p.to_string()),
            Some("(A.id = B.aid AND A.x > 3)".to_string())
        );
    }

    #[test]
    fn test_query_from_json() {
        let q: Query = serde_json::from_str(
            r#"{
                "selection": {"list": ["A.name"]},
                "from": [{"table": "A"}, {"table": "B"}],
                "where": {"and": [
                    {"attribute": {"left_table": "A", "left": "A.id",
                                   "right_table": "B", "right": "B.aid", "relation": "="}},
                    {"constant": {"attribute": "B.n", "relation": ">=", "value": 10}}
                ]}
            }"#,
        )
        .unwrap();

        let expected = Query::new()
            .from_table("A")
            .from_table("B")
            .with_where(Predicate::and(
                Predicate::attr_eq("A.id", "B.aid"),
                Predicate::constant("B.n", Relation::Ge, 10),
            ))
            .select(["A.name"]);
        assert_eq!(q, expected);
    }
}
