//! Query Parameter Filters
//!
//! This crate turns flat, categorized query-parameter mappings into a set
//! of independent filter predicates. Callers combine the predicates with
//! AND and hand them to their data-access layer, or render them into
//! parameterized SQL with [`sql::SqlBuilder`].
//!
//! # Filter Categories
//!
//! - **integer**: `"5"` becomes `column = 5`, `"1,2,3"` becomes `column IN (1, 2, 3)`
//! - **string**: `"a%"` becomes a case-insensitive match, `"a,b"` an OR of matches
//! - **min integer / min timestamp**: `column >= value`, value passed through raw
//! - **max integer / max timestamp**: `column <= value`, value passed through raw
//!
//! Absent and empty values mean "no filter requested" and are dropped.
//! A malformed integer is the only error.
//!
//! # Architecture
//!
//! - [`types`] - Column references, predicates, and filter mappings
//! - [`filters`] - The filter builder
//! - [`schema`] - Mapping raw query strings onto filter categories
//! - [`sql`] - SQL rendering (SQLite and PostgreSQL)
//! - [`config`] - Builder configuration
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```
//! use query_param_filters::make_filters;
//! use query_param_filters::types::{Column, FilterParams, Predicate};
//!
//! let params = FilterParams::new()
//!     .with_integer(Column::new("id"), "1,2,3")
//!     .with_string(Column::new("name"), "smi%")
//!     .with_min_timestamp(Column::new("created_at"), "2024-01-01");
//!
//! let predicates = make_filters(&params).unwrap();
//!
//! assert_eq!(predicates.len(), 3);
//! assert!(predicates.contains(&Predicate::in_list(Column::new("id"), [1i64, 2, 3])));
//! ```
//!
//! # Rendering
//!
//! ```
//! use query_param_filters::sql::{Dialect, SqlBuilder};
//! use query_param_filters::types::{Column, Predicate};
//!
//! let predicate = Predicate::ilike(Column::new("name"), "smi%");
//! let fragment = SqlBuilder::new(Dialect::Postgres).build(&predicate);
//!
//! assert_eq!(fragment.sql, "\"name\" ILIKE $1");
//! assert_eq!(fragment.params.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod filters;
pub mod schema;
pub mod sql;
pub mod types;

pub use config::FilterConfig;
pub use error::{FilterError, FilterResult};
pub use filters::{
    FilterBuilder, clean_null_values, make_filters, make_integer_filters, make_string_filters,
};
pub use schema::FilterSchema;
pub use types::{Column, FilterKind, FilterParams, Predicate, PredicateSet, Value};
