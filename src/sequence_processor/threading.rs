use super::core::*;
use crate::stratify::ReadStrata;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Sender};
use std::thread;

/// Fans reads out to worker threads, each owning a private processor copy.
pub struct ThreadPool<P: SequenceProcessor> {
    handles: Vec<thread::JoinHandle<(P, ProcessingStats)>>,
    tx: Sender<ReadStrata>,
    num_threads: usize,
}

impl<P: SequenceProcessor> ThreadPool<P> {
    pub fn new(processor: &P, num_threads: usize) -> Result<Self> {
        let (tx, rx) = bounded::<ReadStrata>(num_threads * 2);
        let mut handles = Vec::with_capacity(num_threads);

        for _ in 0..num_threads {
            let rx = rx.clone();
            let mut worker_processor = processor.worker_copy();
            let handle = thread::spawn(move || {
                let mut local_stats = ProcessingStats::default();
                while let Ok(read) = rx.recv() {
                    if let Err(e) = worker_processor.process_read(&read) {
                        log::error!("Error processing read {}: {}", read.read_name, e);
                        local_stats.errors += 1;
                    } else {
                        local_stats.processed += 1;
                    }
                }
                (worker_processor, local_stats)
            });
            handles.push(handle);
        }

        Ok(ThreadPool {
            handles,
            tx,
            num_threads,
        })
    }

    pub fn send(&self, read: ReadStrata) -> Result<()> {
        Ok(self.tx.send(read)?)
    }

    pub fn finish(self) -> Result<(ProcessingStats, Vec<P>)> {
        drop(self.tx);

        let collect_progress = ProgressBarBuilder::new("Collecting results")
            .with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .build()?;

        let mut stats = ProcessingStats::default();
        let mut processors = Vec::with_capacity(self.handles.len());

        for (idx, handle) in self.handles.into_iter().enumerate() {
            collect_progress.set_message(format!(
                "Collecting worker {} of {}",
                idx + 1,
                self.num_threads
            ));

            let (worker_processor, worker_stats) = handle
                .join()
                .map_err(|_| anyhow!("Worker thread {} panicked", idx + 1))?;
            processors.push(worker_processor);
            stats.merge(&worker_stats);
            collect_progress.inc(1);
        }
        collect_progress.finish_and_clear();

        Ok((stats, processors))
    }
}

pub fn merge_processors<P: SequenceProcessor>(
    processors: Vec<P>,
    main_processor: &mut P,
) -> Result<()> {
    for (idx, worker_processor) in processors.iter().enumerate() {
        log::debug!("Merging processor {} of {}", idx + 1, processors.len());
        main_processor.merge_processor(worker_processor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct CountingProcessor {
        names: Vec<String>,
    }

    impl SequenceProcessor for CountingProcessor {
        fn process_read(&mut self, read: &ReadStrata) -> Result<()> {
            if read.read_name == "bad" {
                anyhow::bail!("unreadable");
            }
            self.names.push(read.read_name.clone());
            Ok(())
        }

        fn update_progress(&mut self, _stats: &ProcessingStats) {}

        fn supports_parallel(&self) -> bool {
            true
        }

        fn merge_processor(&mut self, other: &Self) -> Result<()> {
            self.names.extend(other.names.iter().cloned());
            Ok(())
        }
    }

    #[test]
    fn test_pool_processes_and_merges_every_read() {
        let mut main = CountingProcessor::default();
        let pool = ThreadPool::new(&main, 3).unwrap();
        for i in 0..20 {
            pool.send(ReadStrata::new(format!("r{}", i))).unwrap();
        }
        pool.send(ReadStrata::new("bad")).unwrap();

        let (stats, processors) = pool.finish().unwrap();
        assert_eq!(processors.len(), 3);
        assert_eq!(stats.processed, 20);
        assert_eq!(stats.errors, 1);

        merge_processors(processors, &mut main).unwrap();
        main.names.sort();
        assert_eq!(main.names.len(), 20);
        assert!(main.names.contains(&"r7".to_string()));
    }
}
