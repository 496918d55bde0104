//! trx-report CLI
//!
//! Entry point for the `trx-report` command-line tool.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use trx_report::{PipelineConfig, ReportPipeline};

#[derive(Parser)]
#[command(name = "trx-report")]
#[command(about = "Convert JSON test results to a CSV report with summary metrics", version)]
struct Cli {
    /// Path to the JSON test-results file
    #[arg(default_value = "test_data.json")]
    input: PathBuf,

    /// Output CSV file path
    #[arg(long, short = 'o', default_value = "test_results.csv")]
    output: PathBuf,

    /// Print the summary as JSON instead of key/value lines
    #[arg(long)]
    json: bool,

    /// Include formatted timestamps in the summary
    #[arg(long)]
    timestamps: bool,

    /// Omit the pass rate from the summary
    #[arg(long)]
    no_pass_rate: bool,

    /// Verbose progress output on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = PipelineConfig {
        include_pass_rate: !cli.no_pass_rate,
        include_formatted_timestamps: cli.timestamps,
        verbose: cli.verbose,
    };

    let mut pipeline = ReportPipeline::new(config);

    let summary = match pipeline.process(&cli.input, &cli.output) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    };

    if cli.json {
        match summary.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        for (key, value) in summary.to_key_values() {
            println!("{}: {}", key, value);
        }
    }
}
