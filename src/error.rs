use std::path::PathBuf;
use thiserror::Error;

use crate::filter::ValueDomain;

pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while reading rule files or evaluating criteria.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Failed to read filter file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot convert '{0}' to a comparator")]
    InvalidComparator(String),

    #[error("Invalid criterion type '{0}'")]
    InvalidCriterionType(String),

    #[error("Invalid {domain} value '{value}'")]
    InvalidValue { domain: ValueDomain, value: String },

    #[error("Value of type {actual} cannot be checked against a {expected} criterion")]
    DomainMismatch {
        expected: ValueDomain,
        actual: ValueDomain,
    },
}
