//! SQL rendering.
//!
//! [`SqlBuilder`] turns predicates into [`SqlFragment`]s for a chosen
//! [`Dialect`]. With the `sqlite` feature, [`SqlParam`] binds directly
//! through `rusqlite`.

mod query_builder;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use query_builder::{Dialect, SqlBuilder, SqlFragment, SqlParam};
