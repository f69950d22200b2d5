use super::processor::SequenceProcessor;
use super::stats::ProcessingStats;
use anyhow::Result;

pub trait SequenceReader {
    fn read_sequences_single_thread<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
    ) -> Result<ProcessingStats>;

    fn read_sequences_with_threads<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
        num_threads: usize,
    ) -> Result<ProcessingStats>;

    fn read_sequences<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
        num_threads: usize,
    ) -> Result<ProcessingStats> {
        if num_threads <= 1 || !processor.supports_parallel() {
            self.read_sequences_single_thread(processor)
        } else {
            self.read_sequences_with_threads(processor, num_threads)
        }
    }
}
