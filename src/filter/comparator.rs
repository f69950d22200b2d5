use crate::error::{FilterError, FilterResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparator {
    Equal,
    NotEqual,
    Smaller,
    SmallerOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparator {
    /// Resolves a comparator token. The token must already be trimmed.
    pub fn from_symbol(symbol: &str) -> FilterResult<Self> {
        match symbol {
            "=" | "==" => Ok(Comparator::Equal),
            "!=" => Ok(Comparator::NotEqual),
            "<" => Ok(Comparator::Smaller),
            "<=" => Ok(Comparator::SmallerOrEqual),
            ">" => Ok(Comparator::Greater),
            ">=" => Ok(Comparator::GreaterOrEqual),
            other => Err(FilterError::InvalidComparator(other.to_string())),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
            Comparator::Smaller => "<",
            Comparator::SmallerOrEqual => "<=",
            Comparator::Greater => ">",
            Comparator::GreaterOrEqual => ">=",
        }
    }

    /// Compares `candidate` against `threshold`. For booleans `false < true`.
    pub fn apply<T: PartialOrd>(&self, candidate: T, threshold: T) -> bool {
        match self {
            Comparator::Equal => candidate == threshold,
            Comparator::NotEqual => candidate != threshold,
            Comparator::Smaller => candidate < threshold,
            Comparator::SmallerOrEqual => candidate <= threshold,
            Comparator::Greater => candidate > threshold,
            Comparator::GreaterOrEqual => candidate >= threshold,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
