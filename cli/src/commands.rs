pub mod run;

use std::path::PathBuf;

use clap::Parser;
use flowtag_common::config::{Config, DEFAULT_OUTPUT_FILE, MalformedPolicy};

#[derive(Parser)]
#[command(name = "flowtag")]
#[command(version)]
#[command(about = "Tags flow log records using a port/protocol lookup table.")]
#[command(
    after_help = "Example: flowtag protocol-numbers.csv lookup.csv flow-log.txt custom-output.txt"
)]
pub struct CommandLine {
    /// CSV mapping protocol numbers or ranges to keywords (header row skipped)
    pub protocol_file: PathBuf,
    /// CSV of dstport,protocol,tag rows (header row skipped)
    pub lookup_file: PathBuf,
    /// Version 2 flow log, one record per line
    pub flow_log_file: PathBuf,
    /// Where the report is written
    #[arg(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,
    /// Log and skip malformed rows instead of aborting the run
    #[arg(long)]
    pub skip_malformed: bool,
    /// Less terminal output (-q hides headers and the tag table, -qq shows only warnings)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> Config {
        let on_malformed = if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        };

        Config {
            protocol_file: self.protocol_file,
            lookup_file: self.lookup_file,
            flow_log_file: self.flow_log_file,
            output_file: self.output_file,
            on_malformed,
            quiet: self.quiet,
        }
    }
}
