use serde::Serialize;
use std::fmt;

/// The two value domains a criterion can be declared over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueDomain {
    Boolean,
    Int,
}

impl ValueDomain {
    /// Maps the type column of a rule line to a domain.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "boolean" => Some(ValueDomain::Boolean),
            "int" => Some(ValueDomain::Int),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ValueDomain::Boolean => "boolean",
            ValueDomain::Int => "int",
        }
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A stratifier value computed for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StratumValue {
    Boolean(bool),
    Int(i32),
}

impl StratumValue {
    pub fn domain(&self) -> ValueDomain {
        match self {
            StratumValue::Boolean(_) => ValueDomain::Boolean,
            StratumValue::Int(_) => ValueDomain::Int,
        }
    }
}

impl From<bool> for StratumValue {
    fn from(value: bool) -> Self {
        StratumValue::Boolean(value)
    }
}

impl From<i32> for StratumValue {
    fn from(value: i32) -> Self {
        StratumValue::Int(value)
    }
}

impl fmt::Display for StratumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StratumValue::Boolean(value) => write!(f, "{}", value),
            StratumValue::Int(value) => write!(f, "{}", value),
        }
    }
}
