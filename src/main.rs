use clap::Parser;
use decodingus_read_filter::cli::{self, Commands};
use decodingus_read_filter::commands;
use decodingus_read_filter::commands::filter_reads::FilterReadsOptions;
use decodingus_read_filter::config::Config;

fn main() {
    let args = cli::Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::load();

    let result = match args.command {
        Commands::CheckFilter { rules, json } => commands::check_filter::run(rules, json),
        Commands::FilterReads {
            bam_file,
            filters,
            output_prefix,
            reference,
            threads,
            level,
            mismatch_policy,
            summary_json,
        } => commands::filter_reads::run(
            FilterReadsOptions {
                bam_file,
                filters,
                output_prefix,
                reference,
                threads,
                level,
                mismatch_policy,
                summary_json,
            },
            &config,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
