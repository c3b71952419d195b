//! Categorized filter inputs.
//!
//! A request's filters arrive as six independent mappings from column to
//! raw string value, one per [`FilterKind`]. Values may be comma-separated
//! lists, empty strings, or absent.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Mapping from column reference to raw filter value.
///
/// `None` and the empty string both mean "no filter requested".
pub type FilterMap<C> = HashMap<C, Option<String>>;

/// The category a filter value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Exact match on integers, `IN` for comma-separated lists.
    Integer,
    /// Case-insensitive pattern match, `OR` for comma-separated lists.
    String,
    /// Inclusive lower bound on an integer column.
    MinInteger,
    /// Inclusive upper bound on an integer column.
    MaxInteger,
    /// Inclusive lower bound on a timestamp column.
    MinTimestamp,
    /// Inclusive upper bound on a timestamp column.
    MaxTimestamp,
}

impl FilterKind {
    /// All filter kinds, in the order their predicates are assembled.
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Integer,
        FilterKind::String,
        FilterKind::MinInteger,
        FilterKind::MaxInteger,
        FilterKind::MinTimestamp,
        FilterKind::MaxTimestamp,
    ];

    /// Returns true for the inclusive lower-bound kinds.
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, FilterKind::MinInteger | FilterKind::MinTimestamp)
    }

    /// Returns true for the inclusive upper-bound kinds.
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, FilterKind::MaxInteger | FilterKind::MaxTimestamp)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Integer => write!(f, "integer"),
            FilterKind::String => write!(f, "string"),
            FilterKind::MinInteger => write!(f, "min_integer"),
            FilterKind::MaxInteger => write!(f, "max_integer"),
            FilterKind::MinTimestamp => write!(f, "min_timestamp"),
            FilterKind::MaxTimestamp => write!(f, "max_timestamp"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "integer" => Ok(FilterKind::Integer),
            "string" => Ok(FilterKind::String),
            "min_integer" => Ok(FilterKind::MinInteger),
            "max_integer" => Ok(FilterKind::MaxInteger),
            "min_timestamp" => Ok(FilterKind::MinTimestamp),
            "max_timestamp" => Ok(FilterKind::MaxTimestamp),
            _ => Err(FilterError::UnknownFilterKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// The six filter mappings accepted by the filter builder.
///
/// Every mapping is optional and defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    default,
    bound(
        serialize = "C: Serialize + Eq + Hash",
        deserialize = "C: Deserialize<'de> + Eq + Hash"
    )
)]
pub struct FilterParams<C> {
    /// Integer equality / membership filters.
    pub integer_filters: FilterMap<C>,
    /// Case-insensitive pattern filters.
    pub string_filters: FilterMap<C>,
    /// Integer lower bounds.
    pub min_integer_filters: FilterMap<C>,
    /// Integer upper bounds.
    pub max_integer_filters: FilterMap<C>,
    /// Timestamp lower bounds.
    pub min_timestamp_filters: FilterMap<C>,
    /// Timestamp upper bounds.
    pub max_timestamp_filters: FilterMap<C>,
}

impl<C> Default for FilterParams<C> {
    fn default() -> Self {
        Self {
            integer_filters: HashMap::new(),
            string_filters: HashMap::new(),
            min_integer_filters: HashMap::new(),
            max_integer_filters: HashMap::new(),
            min_timestamp_filters: HashMap::new(),
            max_timestamp_filters: HashMap::new(),
        }
    }
}

impl<C: Eq + Hash> FilterParams<C> {
    /// Creates an empty set of filter mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mapping for a filter kind.
    pub fn mapping(&self, kind: FilterKind) -> &FilterMap<C> {
        match kind {
            FilterKind::Integer => &self.integer_filters,
            FilterKind::String => &self.string_filters,
            FilterKind::MinInteger => &self.min_integer_filters,
            FilterKind::MaxInteger => &self.max_integer_filters,
            FilterKind::MinTimestamp => &self.min_timestamp_filters,
            FilterKind::MaxTimestamp => &self.max_timestamp_filters,
        }
    }

    fn mapping_mut(&mut self, kind: FilterKind) -> &mut FilterMap<C> {
        match kind {
            FilterKind::Integer => &mut self.integer_filters,
            FilterKind::String => &mut self.string_filters,
            FilterKind::MinInteger => &mut self.min_integer_filters,
            FilterKind::MaxInteger => &mut self.max_integer_filters,
            FilterKind::MinTimestamp => &mut self.min_timestamp_filters,
            FilterKind::MaxTimestamp => &mut self.max_timestamp_filters,
        }
    }

    /// Inserts a raw value into the mapping for `kind`.
    pub fn insert(&mut self, kind: FilterKind, column: C, value: Option<String>) {
        self.mapping_mut(kind).insert(column, value);
    }

    /// Adds a raw value for `kind`, builder style.
    pub fn with(mut self, kind: FilterKind, column: C, value: Option<String>) -> Self {
        self.insert(kind, column, value);
        self
    }

    /// Adds an integer filter.
    pub fn with_integer(self, column: C, value: impl Into<String>) -> Self {
        self.with(FilterKind::Integer, column, Some(value.into()))
    }

    /// Adds a string filter.
    pub fn with_string(self, column: C, value: impl Into<String>) -> Self {
        self.with(FilterKind::String, column, Some(value.into()))
    }

    /// Adds an integer lower bound.
    pub fn with_min_integer(self, column: C, value: impl Into<String>) -> Self {
        self.with(FilterKind::MinInteger, column, Some(value.into()))
    }

    /// Adds an integer upper bound.
    pub fn with_max_integer(self, column: C, value: impl Into<String>) -> Self {
        self.with(FilterKind::MaxInteger, column, Some(value.into()))
    }

    /// Adds a timestamp lower bound.
    pub fn with_min_timestamp(self, column: C, value: impl Into<String>) -> Self {
        self.with(FilterKind::MinTimestamp, column, Some(value.into()))
    }

    /// Adds a timestamp upper bound.
    pub fn with_max_timestamp(self, column: C, value: impl Into<String>) -> Self {
        self.with(FilterKind::MaxTimestamp, column, Some(value.into()))
    }

    /// Adds timestamp bounds from typed instants, formatted as RFC 3339.
    ///
    /// A `None` bound leaves that side open.
    pub fn with_timestamp_range(
        self,
        column: C,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Self
    where
        C: Clone,
    {
        self.with(FilterKind::MinTimestamp, column.clone(), since.map(format_timestamp))
            .with(FilterKind::MaxTimestamp, column, until.map(format_timestamp))
    }

    /// Returns true if no mapping holds any entry.
    pub fn is_empty(&self) -> bool {
        FilterKind::ALL
            .iter()
            .all(|kind| self.mapping(*kind).is_empty())
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
