use crate::filter::Filter;
use crate::sequence_processor::core::{ProcessingStats, SequenceProcessor};
use crate::stratify::{ReadStrata, StratumEntry};
use anyhow::Result;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Granularity of the observations handed to the filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationLevel {
    /// One observation per read, read-level stratifiers only.
    Read,
    /// One observation per aligned base, read-level plus base-level stratifiers.
    #[default]
    Base,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExclusionCounts {
    pub reads: u64,
    pub observations: u64,
    pub excluded_observations: u64,
}

impl ExclusionCounts {
    pub fn merge(&mut self, other: &ExclusionCounts) {
        self.reads += other.reads;
        self.observations += other.observations;
        self.excluded_observations += other.excluded_observations;
    }
}

/// Runs every filter over every observation of every read.
#[derive(Clone)]
pub struct FilterProcessor {
    filters: Vec<Filter>,
    level: ObservationLevel,
    counts: ExclusionCounts,
    progress: Arc<ProgressBar>,
}

impl FilterProcessor {
    pub fn new(filters: Vec<Filter>, level: ObservationLevel) -> Self {
        Self {
            filters,
            level,
            counts: ExclusionCounts::default(),
            progress: Arc::new(ProgressBar::hidden()),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Arc::new(progress);
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn counts(&self) -> ExclusionCounts {
        self.counts
    }

    /// Feeds one observation to every filter. Returns whether any filter
    /// excluded it.
    fn observe(&mut self, read_name: &str, read_values: &[StratumEntry], base: &[StratumEntry]) -> bool {
        let mut excluded = false;
        for filter in self.filters.iter_mut() {
            let mut observation = filter.observe();
            for (stratifier, value) in read_values.iter().chain(base) {
                observation.feed(stratifier.suffix(), *value);
            }
            excluded |= observation.exclude_if_satisfied(read_name);
        }

        self.counts.observations += 1;
        if excluded {
            self.counts.excluded_observations += 1;
        }
        excluded
    }
}

impl SequenceProcessor for FilterProcessor {
    fn process_read(&mut self, read: &ReadStrata) -> Result<()> {
        self.counts.reads += 1;
        match self.level {
            ObservationLevel::Read => {
                self.observe(&read.read_name, &read.read_values, &[]);
            }
            ObservationLevel::Base => {
                for base in &read.bases {
                    self.observe(&read.read_name, &read.read_values, base);
                }
            }
        }
        Ok(())
    }

    fn update_progress(&mut self, stats: &ProcessingStats) {
        self.progress.set_position(stats.processed);
    }

    fn finalize(&mut self) -> Result<()> {
        self.progress.finish_with_message(format!(
            "Filtered {} of {} observations",
            self.counts.excluded_observations, self.counts.observations
        ));
        Ok(())
    }

    fn supports_parallel(&self) -> bool {
        true
    }

    fn worker_copy(&self) -> Self {
        Self {
            filters: self.filters.iter().map(Filter::worker_copy).collect(),
            level: self.level,
            counts: ExclusionCounts::default(),
            progress: Arc::clone(&self.progress),
        }
    }

    fn merge_processor(&mut self, other: &Self) -> Result<()> {
        for (filter, worker_filter) in self.filters.iter_mut().zip(&other.filters) {
            filter.merge_tally(worker_filter);
        }
        self.counts.merge(&other.counts);
        Ok(())
    }
}
