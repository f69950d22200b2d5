use crate::sequence_processor::{core::*, threading::*};
use crate::stratify::strata_from_record;
use anyhow::{Context, Result};
use rust_htslib::bam::{self, Read};
use std::path::Path;

pub struct BamReader {
    reader: bam::Reader,
}

impl BamReader {
    pub fn new(path: &Path, reference: Option<&str>) -> Result<Self> {
        let mut reader = bam::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        if path.extension().map_or(false, |ext| ext == "cram") {
            if let Some(ref_path) = reference {
                reader.set_reference(ref_path)?;
            }
        }

        Ok(Self { reader })
    }
}

impl SequenceReader for BamReader {
    fn read_sequences_single_thread<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
    ) -> Result<ProcessingStats> {
        let mut stats = ProcessingStats::default();
        let mut record = bam::Record::new();

        while let Some(result) = self.reader.read(&mut record) {
            match result {
                Ok(()) => {
                    let read = strata_from_record(&record);
                    if let Err(e) = processor.process_read(&read) {
                        log::error!("Error processing read {}: {}", read.read_name, e);
                        stats.errors += 1;
                    } else {
                        stats.processed += 1;
                    }
                }
                Err(e) => {
                    log::warn!("Error reading record: {}", e);
                    stats.errors += 1;
                }
            }

            if stats.processed % 1000 == 0 {
                processor.update_progress(&stats);
            }
        }

        processor.update_progress(&stats);
        processor.finalize()?;
        Ok(stats)
    }

    fn read_sequences_with_threads<P: SequenceProcessor>(
        &mut self,
        processor: &mut P,
        num_threads: usize,
    ) -> Result<ProcessingStats> {
        let pool = ThreadPool::new(processor, num_threads)?;
        let mut stats = ProcessingStats::default();
        let mut record = bam::Record::new();
        let mut sent = 0u64;

        while let Some(result) = self.reader.read(&mut record) {
            match result {
                Ok(()) => {
                    pool.send(strata_from_record(&record))?;
                    sent += 1;
                    if sent % 1000 == 0 {
                        processor.update_progress(&ProcessingStats {
                            processed: sent,
                            ..stats
                        });
                    }
                }
                Err(e) => {
                    log::warn!("Error reading record: {}", e);
                    stats.errors += 1;
                }
            }
        }

        let (thread_stats, processors) = pool.finish()?;
        stats.merge(&thread_stats);

        merge_processors(processors, processor)?;
        processor.update_progress(&stats);
        processor.finalize()?;

        Ok(stats)
    }
}
