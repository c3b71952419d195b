//! Filter predicate construction.
//!
//! Each category of filter mapping becomes one or more independent
//! predicates:
//!
//! | Category | Single value | Comma-separated list |
//! |----------|--------------|----------------------|
//! | integer | `column = n` | `column IN (n1, n2, ...)` |
//! | string | `column ILIKE p` | `column ILIKE p1 OR column ILIKE p2 ...` |
//! | min integer / min timestamp | `column >= raw` | (not split) |
//! | max integer / max timestamp | `column <= raw` | (not split) |
//!
//! Absent and empty values are dropped before any predicate is built.

mod builder;

pub use builder::{
    FilterBuilder, clean_null_values, make_filters, make_integer_filters, make_string_filters,
};
