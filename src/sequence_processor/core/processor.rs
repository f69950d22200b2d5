use super::stats::ProcessingStats;
use crate::stratify::ReadStrata;
use anyhow::Result;

pub trait SequenceProcessor: Send + Clone + 'static {
    fn process_read(&mut self, read: &ReadStrata) -> Result<()>;
    fn update_progress(&mut self, stats: &ProcessingStats);
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
    fn supports_parallel(&self) -> bool {
        false
    }
    /// A fresh copy for a worker thread, sharing configuration but no results.
    fn worker_copy(&self) -> Self {
        self.clone()
    }
    fn merge_processor(&mut self, _other: &Self) -> Result<()> {
        Ok(())
    }
}
