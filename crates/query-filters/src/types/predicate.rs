//! Predicate expressions.
//!
//! A [`Predicate`] compares a column to a value or a set of values.
//! Predicates are plain data: structurally identical comparisons are
//! equal and hash the same, so collecting them into a [`PredicateSet`]
//! collapses duplicates.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A comparison operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An integer parsed from the request.
    Integer(i64),
    /// Raw text, passed through unparsed.
    Text(String),
}

impl Value {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// A boolean filter condition over column references of type `C`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Predicate<C> {
    /// `column = value`
    Eq { column: C, value: Value },
    /// `column IN (values...)`
    In { column: C, values: Vec<Value> },
    /// Case-insensitive pattern match; the pattern uses SQL LIKE wildcards.
    #[serde(rename = "ilike")]
    ILike { column: C, pattern: String },
    /// `column >= value`
    Ge { column: C, value: Value },
    /// `column <= value`
    Le { column: C, value: Value },
    /// Disjunction of the contained predicates.
    Or { predicates: Vec<Predicate<C>> },
}

/// An unordered collection of independent predicates, meant to be ANDed.
pub type PredicateSet<C> = HashSet<Predicate<C>>;

impl<C> Predicate<C> {
    /// Creates an equality predicate.
    pub fn equals(column: C, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            column,
            value: value.into(),
        }
    }

    /// Creates a membership predicate.
    pub fn in_list<V: Into<Value>>(column: C, values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In {
            column,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a case-insensitive pattern-match predicate.
    pub fn ilike(column: C, pattern: impl Into<String>) -> Self {
        Predicate::ILike {
            column,
            pattern: pattern.into(),
        }
    }

    /// Creates a greater-or-equal predicate.
    pub fn ge(column: C, value: impl Into<Value>) -> Self {
        Predicate::Ge {
            column,
            value: value.into(),
        }
    }

    /// Creates a less-or-equal predicate.
    pub fn le(column: C, value: impl Into<Value>) -> Self {
        Predicate::Le {
            column,
            value: value.into(),
        }
    }

    /// Creates a disjunction.
    pub fn or(predicates: impl IntoIterator<Item = Predicate<C>>) -> Self {
        Predicate::Or {
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Returns the column of a leaf comparison, or `None` for `Or`.
    pub fn column(&self) -> Option<&C> {
        match self {
            Predicate::Eq { column, .. }
            | Predicate::In { column, .. }
            | Predicate::ILike { column, .. }
            | Predicate::Ge { column, .. }
            | Predicate::Le { column, .. } => Some(column),
            Predicate::Or { .. } => None,
        }
    }

    /// Returns true if this is a disjunction.
    pub fn is_or(&self) -> bool {
        matches!(self, Predicate::Or { .. })
    }
}

impl<C: fmt::Display> fmt::Display for Predicate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Eq { column, value } => write!(f, "{} = {}", column, value),
            Predicate::In { column, values } => {
                write!(f, "{} IN (", column)?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            }
            Predicate::ILike { column, pattern } => {
                write!(f, "{} ILIKE {}", column, Value::text(pattern.as_str()))
            }
            Predicate::Ge { column, value } => write!(f, "{} >= {}", column, value),
            Predicate::Le { column, value } => write!(f, "{} <= {}", column, value),
            Predicate::Or { predicates } => {
                write!(f, "(")?;
                for (i, predicate) in predicates.iter().enumerate() {
                    if i > 0 {
                        write!(f, " OR ")?;
                    }
                    write!(f, "{}", predicate)?;
                }
                write!(f, ")")
            }
        }
    }
}
