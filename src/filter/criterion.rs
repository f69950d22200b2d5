use super::comparator::Comparator;
use super::value::{StratumValue, ValueDomain};
use crate::error::{FilterError, FilterResult};
use serde::Serialize;

/// A single `comparator threshold` test whose last outcome is remembered until reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    comparator: Comparator,
    threshold: StratumValue,
    #[serde(skip)]
    satisfied: bool,
}

impl Criterion {
    pub fn new(comparator: Comparator, threshold: StratumValue) -> Self {
        Self {
            comparator,
            threshold,
            satisfied: false,
        }
    }

    pub fn boolean(comparator: Comparator, threshold: bool) -> Self {
        Self::new(comparator, StratumValue::Boolean(threshold))
    }

    pub fn numeric(comparator: Comparator, threshold: i32) -> Self {
        Self::new(comparator, StratumValue::Int(threshold))
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn threshold(&self) -> StratumValue {
        self.threshold
    }

    pub fn domain(&self) -> ValueDomain {
        self.threshold.domain()
    }

    /// Checks `candidate` and stores the outcome. A candidate from the other
    /// domain leaves the stored outcome untouched.
    pub fn evaluate(&mut self, candidate: StratumValue) -> FilterResult<bool> {
        self.satisfied = match (self.threshold, candidate) {
            (StratumValue::Boolean(threshold), StratumValue::Boolean(value)) => {
                self.comparator.apply(value, threshold)
            }
            (StratumValue::Int(threshold), StratumValue::Int(value)) => {
                self.comparator.apply(value, threshold)
            }
            (threshold, value) => {
                return Err(FilterError::DomainMismatch {
                    expected: threshold.domain(),
                    actual: value.domain(),
                })
            }
        };
        Ok(self.satisfied)
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    pub fn reset(&mut self) {
        self.satisfied = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_criterion_is_not_satisfied() {
        let criterion = Criterion::numeric(Comparator::GreaterOrEqual, 0);
        assert!(!criterion.is_satisfied());
    }

    #[test]
    fn test_evaluate_overwrites_previous_outcome() {
        let mut criterion = Criterion::numeric(Comparator::Greater, 5);

        assert!(criterion.evaluate(StratumValue::Int(10)).unwrap());
        assert!(criterion.is_satisfied());

        assert!(!criterion.evaluate(StratumValue::Int(3)).unwrap());
        assert!(!criterion.is_satisfied());
    }

    #[test]
    fn test_boolean_criterion() {
        let mut criterion = Criterion::boolean(Comparator::Equal, true);
        assert!(criterion.evaluate(StratumValue::Boolean(true)).unwrap());
        assert!(!criterion.evaluate(StratumValue::Boolean(false)).unwrap());
    }

    #[test]
    fn test_domain_mismatch_keeps_flag() {
        let mut criterion = Criterion::boolean(Comparator::Equal, true);
        criterion.evaluate(StratumValue::Boolean(true)).unwrap();

        let err = criterion.evaluate(StratumValue::Int(1)).unwrap_err();
        assert!(matches!(
            err,
            FilterError::DomainMismatch {
                expected: ValueDomain::Boolean,
                actual: ValueDomain::Int,
            }
        ));
        assert!(criterion.is_satisfied());
    }

    #[test]
    fn test_reset_clears_flag() {
        let mut criterion = Criterion::numeric(Comparator::Equal, 7);
        criterion.evaluate(StratumValue::Int(7)).unwrap();
        criterion.reset();
        assert!(!criterion.is_satisfied());
    }
}
