//! Error types for filter construction.
//!
//! Only malformed input that cannot be coerced is reported. Absent or
//! empty filter values are never an error; they mean "no filter requested".

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while building filter predicates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A token of an integer filter did not parse as an integer.
    #[error("invalid integer filter value '{token}' for column {column}: {source}")]
    InvalidInteger {
        column: String,
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A filter category name was not recognized.
    #[error("unknown filter kind: {kind}")]
    UnknownFilterKind { kind: String },
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_integer_display() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = FilterError::InvalidInteger {
            column: "\"qty\"".to_string(),
            token: "abc".to_string(),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("invalid integer filter value 'abc'"));
        assert!(message.contains("qty"));
    }

    #[test]
    fn test_invalid_integer_has_source() {
        use std::error::Error as _;

        let source = "".parse::<i64>().unwrap_err();
        let err = FilterError::InvalidInteger {
            column: "id".to_string(),
            token: String::new(),
            source,
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_filter_kind_display() {
        let err = FilterError::UnknownFilterKind {
            kind: "between".to_string(),
        };
        assert_eq!(err.to_string(), "unknown filter kind: between");
    }
}
