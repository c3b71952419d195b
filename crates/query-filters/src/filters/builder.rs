//! Predicate construction from categorized filter mappings.

use std::collections::HashMap;

use crate::config::FilterConfig;
use crate::error::{FilterError, FilterResult};
use crate::sql::{SqlBuilder, SqlFragment};
use crate::types::{ColumnRef, FilterMap, FilterParams, Predicate, PredicateSet, SqlColumn, Value};

/// Builds predicate sets from [`FilterParams`].
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    config: FilterConfig,
}

impl FilterBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Returns the builder configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Drops entries whose value is absent or empty.
    pub fn clean_null_values<C: ColumnRef>(&self, filters: &FilterMap<C>) -> HashMap<C, String> {
        filters
            .iter()
            .filter_map(|(column, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some((column.clone(), v.to_string())),
                _ => {
                    tracing::trace!(column = ?column, "dropping empty filter value");
                    None
                }
            })
            .collect()
    }

    /// Builds equality or membership predicates for integer filters.
    ///
    /// A single token yields `column = n`; a list yields `column IN (...)`.
    /// Tokens are trimmed before parsing. Any token that is not an `i64`
    /// fails the whole call.
    pub fn make_integer_filters<C: ColumnRef>(
        &self,
        filters: &HashMap<C, String>,
    ) -> FilterResult<PredicateSet<C>> {
        let mut predicates = PredicateSet::new();

        for (column, value) in filters {
            if value.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = value.split(self.config.separator).collect();

            if tokens.len() > 1 {
                let values = tokens
                    .iter()
                    .map(|token| parse_integer(column, token).map(Value::Integer))
                    .collect::<FilterResult<Vec<_>>>()?;
                predicates.insert(Predicate::In {
                    column: column.clone(),
                    values,
                });
            } else {
                let n = parse_integer(column, value)?;
                predicates.insert(Predicate::equals(column.clone(), n));
            }
        }

        Ok(predicates)
    }

    /// Builds case-insensitive pattern predicates for string filters.
    ///
    /// Tokens are used verbatim as LIKE patterns; wildcards are the
    /// caller's responsibility. A list yields an `OR` of matches.
    pub fn make_string_filters<C: ColumnRef>(
        &self,
        filters: &HashMap<C, String>,
    ) -> PredicateSet<C> {
        let mut predicates = PredicateSet::new();

        for (column, value) in filters {
            if value.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = value.split(self.config.separator).collect();

            if tokens.len() > 1 {
                predicates.insert(Predicate::or(
                    tokens
                        .into_iter()
                        .map(|token| Predicate::ilike(column.clone(), token)),
                ));
            } else {
                predicates.insert(Predicate::ilike(column.clone(), value.as_str()));
            }
        }

        predicates
    }

    /// Builds the full predicate set for all six filter categories.
    ///
    /// Lower and upper bounds are passed through unparsed as text.
    pub fn make_filters<C: ColumnRef>(
        &self,
        params: &FilterParams<C>,
    ) -> FilterResult<PredicateSet<C>> {
        let integer_filters = self.clean_null_values(&params.integer_filters);
        let string_filters = self.clean_null_values(&params.string_filters);
        let min_integer_filters = self.clean_null_values(&params.min_integer_filters);
        let max_integer_filters = self.clean_null_values(&params.max_integer_filters);
        let min_timestamp_filters = self.clean_null_values(&params.min_timestamp_filters);
        let max_timestamp_filters = self.clean_null_values(&params.max_timestamp_filters);

        let mut predicates = self.make_integer_filters(&integer_filters)?;
        predicates.extend(self.make_string_filters(&string_filters));

        for bounds in [min_integer_filters, min_timestamp_filters] {
            predicates.extend(
                bounds
                    .into_iter()
                    .map(|(column, value)| Predicate::ge(column, value)),
            );
        }
        for bounds in [max_integer_filters, max_timestamp_filters] {
            predicates.extend(
                bounds
                    .into_iter()
                    .map(|(column, value)| Predicate::le(column, value)),
            );
        }

        tracing::debug!(count = predicates.len(), "built filter predicates");

        Ok(predicates)
    }

    /// Builds the predicate set and renders it as one ANDed SQL fragment.
    ///
    /// The same params always render the same SQL text.
    pub fn render<C: ColumnRef + SqlColumn>(
        &self,
        params: &FilterParams<C>,
    ) -> FilterResult<SqlFragment> {
        let predicates = self.make_filters(params)?;
        Ok(SqlBuilder::new(self.config.dialect).build_all(&predicates))
    }
}

fn parse_integer<C: ColumnRef>(column: &C, token: &str) -> FilterResult<i64> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|source| FilterError::InvalidInteger {
            column: format!("{:?}", column),
            token: token.to_string(),
            source,
        })
}

/// Drops entries whose value is absent or empty, using the default config.
pub fn clean_null_values<C: ColumnRef>(filters: &FilterMap<C>) -> HashMap<C, String> {
    FilterBuilder::default().clean_null_values(filters)
}

/// Builds integer predicates using the default config.
pub fn make_integer_filters<C: ColumnRef>(
    filters: &HashMap<C, String>,
) -> FilterResult<PredicateSet<C>> {
    FilterBuilder::default().make_integer_filters(filters)
}

/// Builds string predicates using the default config.
pub fn make_string_filters<C: ColumnRef>(filters: &HashMap<C, String>) -> PredicateSet<C> {
    FilterBuilder::default().make_string_filters(filters)
}

/// Builds the full predicate set using the default config.
pub fn make_filters<C: ColumnRef>(params: &FilterParams<C>) -> FilterResult<PredicateSet<C>> {
    FilterBuilder::default().make_filters(params)
}
