//! `rusqlite` parameter binding.

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use super::query_builder::{SqlFragment, SqlParam};

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::String(s) => ToSqlOutput::from(s.as_str()),
            SqlParam::Integer(i) => ToSqlOutput::from(*i),
        })
    }
}

impl SqlFragment {
    /// Returns the bound parameters as `rusqlite` values.
    pub fn sqlite_params(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p as &dyn ToSql).collect()
    }
}
