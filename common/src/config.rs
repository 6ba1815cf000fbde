use std::path::PathBuf;

use tracing::warn;

use crate::error::ParseError;

pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

pub struct Config {
    /// CSV mapping protocol numbers (or `start-end` ranges) to keywords.
    pub protocol_file: PathBuf,
    /// CSV of `dstport,protocol,tag` rows.
    pub lookup_file: PathBuf,
    /// Version 2 flow log, one record per line.
    pub flow_log_file: PathBuf,
    pub output_file: PathBuf,
    pub on_malformed: MalformedPolicy,
    /// Terminal verbosity reduction, only read by the CLI.
    pub quiet: u8,
}

impl Config {
    pub fn new(
        protocol_file: impl Into<PathBuf>,
        lookup_file: impl Into<PathBuf>,
        flow_log_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            protocol_file: protocol_file.into(),
            lookup_file: lookup_file.into(),
            flow_log_file: flow_log_file.into(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            on_malformed: MalformedPolicy::default(),
            quiet: 0,
        }
    }
}

/// What a stage does when it meets a row or line it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// The first malformed row fails the whole run.
    #[default]
    Abort,
    /// Malformed rows are logged and left out of every count.
    Skip,
}

impl MalformedPolicy {
    /// Returns the error back under [`MalformedPolicy::Abort`], swallows it otherwise.
    pub fn handle(self, err: ParseError) -> Result<(), ParseError> {
        match self {
            MalformedPolicy::Abort => Err(err),
            MalformedPolicy::Skip => {
                warn!("Skipping {err}");
                Ok(())
            }
        }
    }
}
