//! Configuration for the filter builder.
//!
//! # Example
//!
//! ```
//! use query_param_filters::config::FilterConfig;
//! use query_param_filters::sql::Dialect;
//!
//! let config = FilterConfig {
//!     separator: '|',
//!     dialect: Dialect::Postgres,
//! };
//! assert_ne!(config, FilterConfig::default());
//! ```

use serde::{Deserialize, Serialize};

use crate::sql::Dialect;

/// Tunables for [`FilterBuilder`](crate::filters::FilterBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Separator between list tokens in a raw filter value.
    pub separator: char,

    /// SQL dialect used when rendering predicates.
    pub dialect: Dialect,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            separator: ',',
            dialect: Dialect::Sqlite,
        }
    }
}

impl FilterConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the list separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the rendering dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert_eq!(config.separator, ',');
        assert_eq!(config.dialect, Dialect::Sqlite);
    }

    #[test]
    fn test_builder_methods() {
        let config = FilterConfig::new()
            .with_separator(';')
            .with_dialect(Dialect::Postgres);
        assert_eq!(config.separator, ';');
        assert_eq!(config.dialect, Dialect::Postgres);
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let config: FilterConfig = serde_json::from_str(r#"{"dialect":"postgres"}"#).unwrap();
        assert_eq!(
            config,
            FilterConfig {
                separator: ',',
                dialect: Dialect::Postgres,
            }
        );

        let config: FilterConfig = serde_json::from_str(r#"{"separator":";"}"#).unwrap();
        assert_eq!(config, FilterConfig::new().with_separator(';'));

        let config: FilterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FilterConfig::default());
    }
}
