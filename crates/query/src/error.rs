use crate::predicate::Field;
use thiserror::Error;

/// Errors raised while building predicates or parsing queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid value {value:?} for filter {field}")]
    InvalidValue { field: Field, value: String },
    #[error("unknown filter field: {0}")]
    UnknownField(String),
    #[error("No filters found")]
    NoFiltersRecognized,
    #[error("invalid rule pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for QueryError {
    fn from(err: regex::Error) -> Self {
        QueryError::Pattern(err.to_string())
    }
}
