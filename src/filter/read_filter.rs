use super::criterion::Criterion;
use super::logging::{default_log, FilterLog};
use super::value::StratumValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// What happens to the rest of a suffix group when a value of the wrong
/// domain is fed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MismatchPolicy {
    /// Stop at the offending criterion. Criteria after it keep whatever
    /// outcome they already had in this observation.
    #[default]
    AbandonRemaining,
    /// Mark every criterion of the group as not satisfied.
    ClearGroup,
}

/// A named set of criteria grouped by stratifier suffix, plus the tally of
/// reads it excluded during the run.
///
/// Per observation the caller must run `reset`, then `process_value` for every
/// stratifier value, then `is_satisfied`. [`Filter::observe`] enforces that order.
#[derive(Clone)]
pub struct Filter {
    name: String,
    pub(crate) criteria: BTreeMap<String, Vec<Criterion>>,
    filtered_reads: HashMap<String, u32>,
    mismatch_policy: MismatchPolicy,
    log: Arc<dyn FilterLog>,
}

impl Filter {
    pub fn new(name: impl Into<String>, criteria: BTreeMap<String, Vec<Criterion>>) -> Self {
        Self {
            name: name.into(),
            criteria,
            filtered_reads: HashMap::new(),
            mismatch_policy: MismatchPolicy::default(),
            log: default_log(),
        }
    }

    pub(crate) fn empty(name: impl Into<String>, log: Arc<dyn FilterLog>) -> Self {
        Self {
            log,
            ..Self::new(name, BTreeMap::new())
        }
    }

    pub fn with_log(mut self, log: Arc<dyn FilterLog>) -> Self {
        self.log = log;
        self
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mismatch_policy(&self) -> MismatchPolicy {
        self.mismatch_policy
    }

    pub fn criteria(&self) -> &BTreeMap<String, Vec<Criterion>> {
        &self.criteria
    }

    pub fn criteria_count(&self) -> usize {
        self.criteria.values().map(Vec::len).sum()
    }

    pub(crate) fn push_criterion(&mut self, suffix: String, criterion: Criterion) {
        self.criteria.entry(suffix).or_default().push(criterion);
    }

    /// Clears the outcome of every criterion. Must run before each new observation.
    pub fn reset(&mut self) {
        self.criteria
            .values_mut()
            .flat_map(|group| group.iter_mut())
            .for_each(Criterion::reset);
    }

    /// Checks `value` against every criterion registered for `suffix`, in
    /// declaration order. Absent values and unknown suffixes are ignored.
    pub fn process_value(&mut self, suffix: &str, value: Option<StratumValue>) {
        let Some(value) = value else {
            return;
        };
        let Some(group) = self.criteria.get_mut(suffix) else {
            return;
        };

        // Evaluation stops at the first criterion of another domain.
        let mismatch = group
            .iter_mut()
            .find_map(|criterion| criterion.evaluate(value).err());

        if let Some(e) = mismatch {
            self.log.warn(&format!(
                "Invalid stratus type for filter '{}', suffix '{}': {}",
                self.name, suffix, e
            ));
            if self.mismatch_policy == MismatchPolicy::ClearGroup {
                group.iter_mut().for_each(Criterion::reset);
            }
        }
    }

    /// True when every criterion of every suffix currently holds, including
    /// when there are no criteria at all.
    pub fn is_satisfied(&self) -> bool {
        self.criteria
            .values()
            .all(|group| group.iter().all(Criterion::is_satisfied))
    }

    pub fn add_read_by_id(&mut self, read_id: &str) {
        match self.filtered_reads.get_mut(read_id) {
            Some(count) => *count += 1,
            None => {
                self.filtered_reads.insert(read_id.to_string(), 1);
            }
        }
    }

    pub fn filtered_reads(&self) -> &HashMap<String, u32> {
        &self.filtered_reads
    }

    /// Starts a new observation cycle. The filter is reset immediately.
    pub fn observe(&mut self) -> Observation<'_> {
        self.reset();
        Observation { filter: self }
    }

    /// A private copy for a worker thread: same rules, cleared outcomes and
    /// an empty tally.
    pub fn worker_copy(&self) -> Self {
        let mut copy = Self {
            name: self.name.clone(),
            criteria: self.criteria.clone(),
            filtered_reads: HashMap::new(),
            mismatch_policy: self.mismatch_policy,
            log: Arc::clone(&self.log),
        };
        copy.reset();
        copy
    }

    /// Adds another copy's tally into this one.
    pub fn merge_tally(&mut self, other: &Filter) {
        for (read_id, &count) in &other.filtered_reads {
            *self.filtered_reads.entry(read_id.clone()).or_insert(0) += count;
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.name)
            .field("criteria", &self.criteria)
            .field("filtered_reads", &self.filtered_reads.len())
            .field("mismatch_policy", &self.mismatch_policy)
            .finish()
    }
}

/// One reset/process/query cycle over a [`Filter`].
pub struct Observation<'a> {
    filter: &'a mut Filter,
}

impl Observation<'_> {
    pub fn feed(&mut self, suffix: &str, value: Option<StratumValue>) -> &mut Self {
        self.filter.process_value(suffix, value);
        self
    }

    pub fn is_satisfied(&self) -> bool {
        self.filter.is_satisfied()
    }

    /// Ends the cycle, tallying `read_id` when the filter is satisfied.
    pub fn exclude_if_satisfied(self, read_id: &str) -> bool {
        let satisfied = self.filter.is_satisfied();
        if satisfied {
            self.filter.add_read_by_id(read_id);
        }
        satisfied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::comparator::Comparator;
    use crate::filter::logging::RecordingLog;

    fn two_suffix_filter() -> Filter {
        let mut filter = Filter::new("two", BTreeMap::new());
        filter.push_criterion("A".to_string(), Criterion::numeric(Comparator::Greater, 5));
        filter.push_criterion("B".to_string(), Criterion::boolean(Comparator::Equal, true));
        filter
    }

    #[test]
    fn test_empty_filter_is_vacuously_satisfied() {
        let filter = Filter::new("empty", BTreeMap::new());
        assert!(filter.is_satisfied());
    }

    #[test]
    fn test_conjunction_across_suffixes() {
        let mut filter = two_suffix_filter();

        filter.reset();
        filter.process_value("A", Some(StratumValue::Int(10)));
        filter.process_value("B", Some(StratumValue::Boolean(true)));
        assert!(filter.is_satisfied());

        filter.reset();
        filter.process_value("A", Some(StratumValue::Int(10)));
        assert!(!filter.is_satisfied());
    }

    #[test]
    fn test_reset_prevents_state_leaking_between_observations() {
        let mut filter = two_suffix_filter();
        filter.process_value("A", Some(StratumValue::Int(10)));
        filter.process_value("B", Some(StratumValue::Boolean(true)));
        assert!(filter.is_satisfied());

        filter.reset();
        assert!(!filter.is_satisfied());
    }

    #[test]
    fn test_absent_values_and_unknown_suffixes_are_ignored() {
        let log = RecordingLog::new();
        let mut filter = two_suffix_filter().with_log(log.clone());
        filter.reset();
        filter.process_value("A", None);
        filter.process_value("C", Some(StratumValue::Int(100)));
        assert!(!filter.is_satisfied());
        assert!(log.is_empty());
    }

    #[test]
    fn test_tally_counts_repeats() {
        let mut filter = two_suffix_filter();
        filter.add_read_by_id("r1");
        filter.add_read_by_id("r1");
        filter.add_read_by_id("r2");

        let tally = filter.filtered_reads();
        assert_eq!(tally.len(), 2);
        assert_eq!(tally["r1"], 2);
        assert_eq!(tally["r2"], 1);
    }

    #[test]
    fn test_tally_survives_reset() {
        let mut filter = two_suffix_filter();
        filter.add_read_by_id("r1");
        filter.reset();
        assert_eq!(filter.filtered_reads()["r1"], 1);
    }

    fn mixed_group_filter(log: Arc<RecordingLog>) -> Filter {
        let mut filter = Filter::new("mixed", BTreeMap::new()).with_log(log);
        filter.push_criterion("A".to_string(), Criterion::numeric(Comparator::Greater, 5));
        filter.push_criterion("A".to_string(), Criterion::boolean(Comparator::Equal, true));
        filter.push_criterion("A".to_string(), Criterion::numeric(Comparator::Smaller, 50));
        filter
    }

    #[test]
    fn test_mismatch_abandons_remaining_criteria() {
        let log = RecordingLog::new();
        let mut filter = mixed_group_filter(log.clone());
        filter.reset();

        filter.process_value("A", Some(StratumValue::Int(10)));
        assert_eq!(log.len(), 1);

        let flags: Vec<bool> = filter.criteria["A"].iter().map(|c| c.is_satisfied()).collect();
        assert_eq!(flags, vec![true, false, false]);

        // The boolean criterion stops this call before anything else is touched.
        filter.process_value("A", Some(StratumValue::Boolean(true)));
        assert_eq!(log.len(), 2);
        let flags: Vec<bool> = filter.criteria["A"].iter().map(|c| c.is_satisfied()).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_mismatch_keeps_earlier_results() {
        let log = RecordingLog::new();
        let mut filter = Filter::new("m", BTreeMap::new()).with_log(log.clone());
        filter.push_criterion("A".to_string(), Criterion::numeric(Comparator::Greater, 5));
        filter.reset();

        filter.process_value("A", Some(StratumValue::Int(10)));
        filter.process_value("A", Some(StratumValue::Boolean(false)));

        assert_eq!(log.len(), 1);
        assert!(filter.is_satisfied());
    }

    #[test]
    fn test_clear_group_policy_resets_whole_group() {
        let log = RecordingLog::new();
        let mut filter =
            mixed_group_filter(log.clone()).with_mismatch_policy(MismatchPolicy::ClearGroup);
        filter.push_criterion("B".to_string(), Criterion::numeric(Comparator::Equal, 1));
        filter.reset();

        filter.process_value("B", Some(StratumValue::Int(1)));
        filter.process_value("A", Some(StratumValue::Int(10)));

        assert!(filter.criteria["A"].iter().all(|c| !c.is_satisfied()));
        assert!(filter.criteria["B"][0].is_satisfied());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_observation_cycle() {
        let mut filter = two_suffix_filter();

        let mut observation = filter.observe();
        observation
            .feed("A", Some(StratumValue::Int(6)))
            .feed("B", Some(StratumValue::Boolean(true)));
        assert!(observation.exclude_if_satisfied("r1"));

        let mut observation = filter.observe();
        observation.feed("A", Some(StratumValue::Int(6)));
        assert!(!observation.exclude_if_satisfied("r2"));

        assert_eq!(filter.filtered_reads().len(), 1);
        assert_eq!(filter.filtered_reads()["r1"], 1);
    }

    #[test]
    fn test_worker_copy_and_merge() {
        let mut main = two_suffix_filter();
        main.add_read_by_id("r1");

        let mut worker = main.worker_copy();
        assert!(worker.filtered_reads().is_empty());
        assert_eq!(worker.criteria_count(), 2);
        worker.add_read_by_id("r1");
        worker.add_read_by_id("r3");

        main.merge_tally(&worker);
        assert_eq!(main.filtered_reads()["r1"], 2);
        assert_eq!(main.filtered_reads()["r3"], 1);
    }
}
