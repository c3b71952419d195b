//! SQL rendering for filter predicates.
//!
//! Translates predicates into parameterized SQL fragments. Values are
//! never inlined; every operand becomes a bound [`SqlParam`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Predicate, SqlColumn, Value};

/// Target SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// SQLite: `?N` placeholders, `LOWER(..) LIKE LOWER(..)` for case-insensitive match.
    #[default]
    Sqlite,
    /// PostgreSQL: `$N` placeholders, native `ILIKE`.
    Postgres,
}

impl Dialect {
    /// Returns the placeholder for the `n`th (1-based) parameter.
    pub fn placeholder(&self, n: usize) -> String {
        match self {
            Dialect::Sqlite => format!("?{}", n),
            Dialect::Postgres => format!("${}", n),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Sqlite => write!(f, "sqlite"),
            Dialect::Postgres => write!(f, "postgres"),
        }
    }
}

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values, in placeholder order.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }
}

impl From<&Value> for SqlParam {
    fn from(value: &Value) -> Self {
        match value {
            Value::Integer(i) => SqlParam::Integer(*i),
            Value::Text(s) => SqlParam::String(s.clone()),
        }
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Adds a parameter and returns its 1-based position within this fragment.
    pub fn add_param(&mut self, param: SqlParam) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Combines with another fragment using AND.
    ///
    /// Placeholders in `other` must already be numbered after this fragment's.
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) AND ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Combines with another fragment using OR.
    ///
    /// Placeholders in `other` must already be numbered after this fragment's.
    pub fn or(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) OR ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Renders predicates into SQL for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlBuilder {
    dialect: Dialect,
    /// Number of parameters already used by an enclosing query.
    ///
    /// The first placeholder emitted is `param_offset + 1`.
    param_offset: usize,
}

impl SqlBuilder {
    /// Creates a builder whose placeholders start at 1.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            param_offset: 0,
        }
    }

    /// Sets the parameter offset for fragments embedded in a larger query.
    ///
    /// If the outer query already binds `?1` and `?2`, use an offset of 2.
    pub fn with_param_offset(mut self, offset: usize) -> Self {
        self.param_offset = offset;
        self
    }

    /// Returns the dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Renders a single predicate.
    pub fn build<C: SqlColumn>(&self, predicate: &Predicate<C>) -> SqlFragment {
        self.build_predicate(predicate, self.param_offset)
    }

    /// Renders predicates combined with AND.
    ///
    /// Terms are ordered by their standalone rendering, so the same set of
    /// predicates always yields the same SQL text whatever order the
    /// iterator produces them in. Returns an empty fragment when there are
    /// no predicates.
    pub fn build_all<'a, C: SqlColumn + 'a>(
        &self,
        predicates: impl IntoIterator<Item = &'a Predicate<C>>,
    ) -> SqlFragment {
        let mut ordered: Vec<(SqlFragment, &Predicate<C>)> = predicates
            .into_iter()
            .map(|predicate| (self.build_predicate(predicate, 0), predicate))
            .collect();
        ordered.sort_by(|(a, _), (b, _)| {
            a.sql.cmp(&b.sql).then_with(|| a.params.cmp(&b.params))
        });

        let mut combined = SqlFragment::default();
        let mut offset = self.param_offset;

        for (_, predicate) in ordered {
            let fragment = self.build_predicate(predicate, offset);
            offset += fragment.params.len();
            combined = combined.and(fragment);
        }

        combined
    }

    fn build_predicate<C: SqlColumn>(
        &self,
        predicate: &Predicate<C>,
        offset: usize,
    ) -> SqlFragment {
        match predicate {
            Predicate::Eq { column, value } => self.build_comparison(column, "=", value, offset),
            Predicate::Ge { column, value } => self.build_comparison(column, ">=", value, offset),
            Predicate::Le { column, value } => self.build_comparison(column, "<=", value, offset),
            Predicate::In { column, values } => self.build_in(column, values, offset),
            Predicate::ILike { column, pattern } => self.build_ilike(column, pattern, offset),
            Predicate::Or { predicates } => self.build_or(predicates, offset),
        }
    }

    fn build_comparison<C: SqlColumn>(
        &self,
        column: &C,
        op: &str,
        value: &Value,
        offset: usize,
    ) -> SqlFragment {
        SqlFragment::with_params(
            format!(
                "{} {} {}",
                column.sql_identifier(),
                op,
                self.dialect.placeholder(offset + 1)
            ),
            vec![SqlParam::from(value)],
        )
    }

    fn build_in<C: SqlColumn>(&self, column: &C, values: &[Value], offset: usize) -> SqlFragment {
        if values.is_empty() {
            return SqlFragment::new("1 = 0");
        }

        let placeholders: Vec<String> = (1..=values.len())
            .map(|i| self.dialect.placeholder(offset + i))
            .collect();

        SqlFragment::with_params(
            format!(
                "{} IN ({})",
                column.sql_identifier(),
                placeholders.join(", ")
            ),
            values.iter().map(SqlParam::from).collect(),
        )
    }

    fn build_ilike<C: SqlColumn>(&self, column: &C, pattern: &str, offset: usize) -> SqlFragment {
        let placeholder = self.dialect.placeholder(offset + 1);
        let sql = match self.dialect {
            Dialect::Sqlite => format!(
                "LOWER({}) LIKE LOWER({})",
                column.sql_identifier(),
                placeholder
            ),
            Dialect::Postgres => format!("{} ILIKE {}", column.sql_identifier(), placeholder),
        };

        SqlFragment::with_params(sql, vec![SqlParam::string(pattern)])
    }

    fn build_or<C: SqlColumn>(&self, predicates: &[Predicate<C>], offset: usize) -> SqlFragment {
        if predicates.is_empty() {
            return SqlFragment::new("1 = 0");
        }

        let mut combined = SqlFragment::default();
        let mut current = offset;

        for predicate in predicates {
            let fragment = self.build_predicate(predicate, current);
            current += fragment.params.len();
            combined = combined.or(fragment);
        }

        combined.sql = format!("({})", combined.sql);
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    #[test]
    fn test_eq_sqlite() {
        let frag =
            SqlBuilder::new(Dialect::Sqlite).build(&Predicate::equals(Column::new("qty"), 5i64));

        assert_eq!(frag.sql, "\"qty\" = ?1");
        assert_eq!(frag.params, vec![SqlParam::Integer(5)]);
    }

    #[test]
    fn test_in_postgres() {
        let frag = SqlBuilder::new(Dialect::Postgres)
            .build(&Predicate::in_list(Column::new("id"), [1i64, 2, 3]));

        assert_eq!(frag.sql, "\"id\" IN ($1, $2, $3)");
        assert_eq!(frag.params.len(), 3);
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let predicate: Predicate<Column> = Predicate::In {
            column: Column::new("id"),
            values: vec![],
        };
        let frag = SqlBuilder::new(Dialect::Sqlite).build(&predicate);

        assert!(frag.sql.contains("1 = 0"));
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_ilike_per_dialect() {
        let predicate = Predicate::ilike(Column::new("name"), "sm%");

        let sqlite = SqlBuilder::new(Dialect::Sqlite).build(&predicate);
        assert_eq!(sqlite.sql, "LOWER(\"name\") LIKE LOWER(?1)");

        let postgres = SqlBuilder::new(Dialect::Postgres).build(&predicate);
        assert_eq!(postgres.sql, "\"name\" ILIKE $1");
        assert_eq!(postgres.params, vec![SqlParam::string("sm%")]);
    }

    #[test]
    fn test_bounds_bind_raw_text() {
        let frag = SqlBuilder::new(Dialect::Sqlite).build(&Predicate::ge(Column::new("qty"), "3"));

        assert_eq!(frag.sql, "\"qty\" >= ?1");
        assert_eq!(frag.params, vec![SqlParam::string("3")]);

        let frag = SqlBuilder::new(Dialect::Sqlite).build(&Predicate::le(Column::new("qty"), "9"));
        assert_eq!(frag.sql, "\"qty\" <= ?1");
    }

    #[test]
    fn test_or_numbers_placeholders_in_order() {
        let predicate = Predicate::or([
            Predicate::ilike(Column::new("name"), "a"),
            Predicate::ilike(Column::new("name"), "b"),
        ]);
        let frag = SqlBuilder::new(Dialect::Postgres).build(&predicate);

        assert_eq!(frag.sql, "((\"name\" ILIKE $1) OR (\"name\" ILIKE $2))");
        assert_eq!(
            frag.params,
            vec![SqlParam::string("a"), SqlParam::string("b")]
        );
    }

    #[test]
    fn test_build_all_ands_with_offset() {
        let predicates = vec![
            Predicate::in_list(Column::new("id"), [1i64, 2]),
            Predicate::le(Column::new("qty"), "9"),
        ];
        let frag = SqlBuilder::new(Dialect::Sqlite)
            .with_param_offset(2)
            .build_all(&predicates);

        assert_eq!(frag.sql, "(\"id\" IN (?3, ?4)) AND (\"qty\" <= ?5)");
        assert_eq!(frag.params.len(), 3);
    }

    #[test]
    fn test_build_all_order_is_independent_of_input_order() {
        let forward = vec![
            Predicate::le(Column::new("qty"), "9"),
            Predicate::in_list(Column::new("id"), [1i64, 2]),
            Predicate::ilike(Column::new("name"), "a%"),
        ];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();
        let builder = SqlBuilder::new(Dialect::Postgres);

        let a = builder.build_all(&forward);
        let b = builder.build_all(&backward);

        assert_eq!(a, b);
        assert_eq!(
            a.sql,
            "((\"id\" IN ($1, $2)) AND (\"name\" ILIKE $3)) AND (\"qty\" <= $4)"
        );
        assert_eq!(
            a.params,
            vec![
                SqlParam::integer(1),
                SqlParam::integer(2),
                SqlParam::string("a%"),
                SqlParam::string("9"),
            ]
        );
    }

    #[test]
    fn test_build_all_empty() {
        let predicates: Vec<Predicate<Column>> = Vec::new();
        let frag = SqlBuilder::new(Dialect::Sqlite).build_all(&predicates);

        assert!(frag.is_empty());
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_fragment_add_param() {
        let mut frag = SqlFragment::new("x = ?1");
        assert_eq!(frag.add_param(SqlParam::integer(1)), 1);
        assert_eq!(frag.add_param(SqlParam::integer(2)), 2);
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::Sqlite.to_string(), "sqlite");
        assert_eq!(Dialect::Postgres.to_string(), "postgres");
    }

    #[test]
    fn test_dialect_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Dialect::Postgres).unwrap(), "\"postgres\"");
        assert_eq!(serde_json::to_string(&Dialect::Sqlite).unwrap(), "\"sqlite\"");
        assert_eq!(serde_json::from_str::<Dialect>("\"postgres\"").unwrap(), Dialect::Postgres);
        assert!(serde_json::from_str::<Dialect>("\"Postgres\"").is_err());
    }
}
