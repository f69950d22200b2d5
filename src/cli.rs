use crate::filter::MismatchPolicy;
use crate::sequence_processor::ObservationLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log every recoverable rule or evaluation problem (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse filter rule files and show the criteria they define
    CheckFilter {
        /// Filter rule files
        #[arg(required = true)]
        rules: Vec<PathBuf>,
        /// Print the parsed filters as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run filter rule files over every read of a BAM/CRAM file and report excluded reads
    FilterReads {
        /// Input BAM or CRAM file
        bam_file: PathBuf,
        /// Filter rule file (repeatable)
        #[arg(short = 'f', long = "filter", required = true)]
        filters: Vec<PathBuf>,
        /// Prefix for the per-filter reports
        #[arg(short = 'o', long = "output", default_value = "read_filter")]
        output_prefix: String,
        /// Reference FASTA, required for CRAM input
        #[arg(short = 'r', long)]
        reference: Option<String>,
        /// Worker threads (defaults to the configured value)
        #[arg(short = 't', long)]
        threads: Option<usize>,
        /// Whether observations are whole reads or aligned bases
        #[arg(long, value_enum)]
        level: Option<ObservationLevel>,
        /// How a value of the wrong type affects the rest of a criterion group
        #[arg(long, value_enum)]
        mismatch_policy: Option<MismatchPolicy>,
        /// Also write a JSON run summary to <OUTPUT>.summary.json
        #[arg(long)]
        summary_json: bool,
    },
}
