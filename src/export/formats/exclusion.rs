use crate::filter::MismatchPolicy;
use crate::sequence_processor::{ExclusionCounts, ObservationLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RunSummaryExport {
    pub input: String,
    pub observation_level: ObservationLevel,
    pub mismatch_policy: MismatchPolicy,
    pub reads_processed: u64,
    pub read_errors: u64,
    pub counts: ExclusionCounts,
    pub filters: Vec<FilterTallyExport>,
}

#[derive(Debug, Serialize)]
pub struct FilterTallyExport {
    pub name: String,
    pub distinct_reads: usize,
    pub excluded_observations: u64,
    pub report: String,
}
