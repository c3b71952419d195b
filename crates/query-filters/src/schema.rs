//! Query-string to filter mapping.
//!
//! A [`FilterSchema`] records which query parameter feeds which filter
//! category and column, and sorts a request's flat parameters into
//! [`FilterParams`].
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use query_param_filters::schema::FilterSchema;
//! use query_param_filters::types::{Column, FilterKind};
//!
//! let schema = FilterSchema::new()
//!     .bind("id", FilterKind::Integer, Column::new("id"))
//!     .bind("name", FilterKind::String, Column::new("name"))
//!     .bind("created_after", FilterKind::MinTimestamp, Column::new("created_at"));
//!
//! let query = HashMap::from([
//!     ("id".to_string(), "1,2".to_string()),
//!     ("page".to_string(), "3".to_string()),
//! ]);
//!
//! let params = schema.params_from_map(&query);
//! assert_eq!(params.integer_filters.len(), 1);
//! assert!(params.string_filters.is_empty());
//! ```

use std::collections::HashMap;

use crate::types::{ColumnRef, FilterKind, FilterParams};

/// A query parameter's filter category and target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBinding<C> {
    /// Filter category.
    pub kind: FilterKind,
    /// Column the filter applies to.
    pub column: C,
}

/// Registry of query parameters that act as filters.
#[derive(Debug, Clone)]
pub struct FilterSchema<C> {
    bindings: HashMap<String, FilterBinding<C>>,
}

impl<C> Default for FilterSchema<C> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<C: ColumnRef> FilterSchema<C> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a query parameter. Re-binding a name replaces it.
    pub fn bind(mut self, param: impl Into<String>, kind: FilterKind, column: C) -> Self {
        self.bindings.insert(param.into(), FilterBinding { kind, column });
        self
    }

    /// Looks up the binding for a query parameter.
    pub fn binding(&self, param: &str) -> Option<&FilterBinding<C>> {
        self.bindings.get(param)
    }

    /// Number of registered parameters.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no parameters are registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Sorts a request's query parameters into filter mappings.
    ///
    /// Unregistered parameters are ignored.
    pub fn params_from_map(&self, query: &HashMap<String, String>) -> FilterParams<C> {
        self.params_from_pairs(query.iter())
    }

    /// Like [`params_from_map`](Self::params_from_map) over ordered pairs.
    ///
    /// When a parameter repeats, the last value wins.
    pub fn params_from_pairs<K, V>(
        &self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> FilterParams<C>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = FilterParams::new();

        for (name, value) in pairs {
            let name = name.as_ref();
            match self.bindings.get(name) {
                Some(binding) => params.insert(
                    binding.kind,
                    binding.column.clone(),
                    Some(value.as_ref().to_string()),
                ),
                None => tracing::trace!(param = name, "ignoring unbound query parameter"),
            }
        }

        params
    }
}
