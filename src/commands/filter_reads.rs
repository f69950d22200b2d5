use super::load_filters;
use crate::config::Config;
use crate::export::formats::exclusion::{FilterTallyExport, RunSummaryExport};
use crate::export::{report_paths, save_exclusion_report};
use crate::filter::MismatchPolicy;
use crate::sequence_processor::readers::BamReader;
use crate::sequence_processor::{FilterProcessor, ObservationLevel, SequenceReader};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

pub struct FilterReadsOptions {
    pub bam_file: PathBuf,
    pub filters: Vec<PathBuf>,
    pub output_prefix: String,
    pub reference: Option<String>,
    pub threads: Option<usize>,
    pub level: Option<ObservationLevel>,
    pub mismatch_policy: Option<MismatchPolicy>,
    pub summary_json: bool,
}

pub fn run(options: FilterReadsOptions, config: &Config) -> Result<()> {
    let threads = options.threads.unwrap_or(config.threads).max(1);
    let level = options.level.unwrap_or(config.observation_level);
    let policy = options.mismatch_policy.unwrap_or(config.mismatch_policy);

    let loaded = load_filters(&options.filters, policy)?;
    if loaded.is_empty() {
        bail!("None of the given filter files defines a filter");
    }
    let filters = loaded.into_iter().map(|(_, filter)| filter).collect();

    let progress = ProgressBarBuilder::new("Filtering reads")
        .with_template("{spinner:.green} [{elapsed_precise}] {msg} {pos} reads ({per_sec})")
        .build()?;
    let mut processor = FilterProcessor::new(filters, level).with_progress(progress);

    let mut reader = BamReader::new(&options.bam_file, options.reference.as_deref())?;
    let stats = reader.read_sequences(&mut processor, threads)?;

    let counts = processor.counts();
    println!("Processed {} reads", stats.processed);
    if stats.errors > 0 {
        println!("Failed to process {} records", stats.errors);
    }
    println!(
        "Excluded {} of {} observations",
        counts.excluded_observations, counts.observations
    );

    let names: Vec<&str> = processor.filters().iter().map(|f| f.name()).collect();
    let paths = report_paths(&options.output_prefix, &names, &config.report_extension);

    let mut tallies = Vec::with_capacity(paths.len());
    for (filter, path) in processor.filters().iter().zip(paths) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        save_exclusion_report(filter, &path)?;

        let excluded: u64 = filter.filtered_reads().values().map(|&c| c as u64).sum();
        println!(
            "{}: {} reads, {} observations -> {}",
            filter.name(),
            filter.filtered_reads().len(),
            excluded,
            path.display()
        );
        tallies.push(FilterTallyExport {
            name: filter.name().to_string(),
            distinct_reads: filter.filtered_reads().len(),
            excluded_observations: excluded,
            report: path.display().to_string(),
        });
    }

    if options.summary_json {
        let summary = RunSummaryExport {
            input: options.bam_file.display().to_string(),
            observation_level: level,
            mismatch_policy: policy,
            reads_processed: stats.processed,
            read_errors: stats.errors,
            counts,
            filters: tallies,
        };
        let path = PathBuf::from(format!("{}.summary.json", options.output_prefix));
        fs::write(&path, serde_json::to_string_pretty(&summary)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
