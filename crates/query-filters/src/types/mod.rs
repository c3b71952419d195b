//! Core types for filter construction.
//!
//! This module defines column references, predicate values and
//! expressions, and the categorized filter mappings consumed by the
//! filter builder.

mod column;
mod params;
mod predicate;

pub use column::{Column, ColumnRef, SqlColumn, quote_identifier};
pub use params::{FilterKind, FilterMap, FilterParams};
pub use predicate::{Predicate, PredicateSet, Value};
