//! Column references.
//!
//! The filter builder treats columns as opaque keys. Anything that is
//! `Clone + Eq + Hash + Debug` can be used. SQL rendering additionally
//! needs [`SqlColumn`] to obtain a quoted identifier.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// An opaque handle identifying a table column.
///
/// Blanket-implemented for every type with the required bounds.
pub trait ColumnRef: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> ColumnRef for T {}

/// A column that can be rendered into SQL.
pub trait SqlColumn {
    /// Returns the quoted SQL identifier for this column.
    fn sql_identifier(&self) -> String;
}

/// A concrete column reference with an optional table qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Column {
    /// Owning table, if the column should be qualified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl Column {
    /// Creates an unqualified column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a table-qualified column.
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Sets the table qualifier.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl SqlColumn for Column {
    fn sql_identifier(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", quote_identifier(table), quote_identifier(&self.name)),
            None => quote_identifier(&self.name),
        }
    }
}

impl SqlColumn for String {
    fn sql_identifier(&self) -> String {
        quote_identifier(self)
    }
}

impl SqlColumn for &str {
    fn sql_identifier(&self) -> String {
        quote_identifier(self)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::new(name)
    }
}

/// Double-quotes an identifier, doubling any embedded quotes.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("qty"), "\"qty\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_column_identifier() {
        assert_eq!(Column::new("name").sql_identifier(), "\"name\"");
        assert_eq!(
            Column::qualified("items", "name").sql_identifier(),
            "\"items\".\"name\""
        );
        assert_eq!("name".sql_identifier(), "\"name\"");
    }

    #[test]
    fn test_column_display() {
        assert_eq!(Column::new("qty").to_string(), "qty");
        assert_eq!(Column::new("qty").with_table("items").to_string(), "items.qty");
    }
}
