//! # Error Taxonomy
//!
//! Every pipeline stage returns [`FlowTagError`] so callers can tell a missing input
//! file apart from a malformed row or a failed report write.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Protocols,
    Lookup,
    FlowLog,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Protocols => "protocol table",
            Stage::Lookup => "lookup table",
            Stage::FlowLog => "flow log",
            Stage::Report => "report",
        };
        f.write_str(name)
    }
}

/// What exactly is wrong with a single row or line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected at least {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("malformed range '{0}'")]
    MalformedRange(String),

    /// Row could not be decoded at all (bad quoting, invalid UTF-8).
    #[error("{0}")]
    Malformed(String),
}

/// A malformed row in a reference table or a malformed flow-log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} line {line}: {kind}")]
pub struct ParseError {
    pub stage: Stage,
    /// 1-based line number in the source file.
    pub line: u64,
    #[source]
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(stage: Stage, line: u64, kind: ParseErrorKind) -> Self {
        Self { stage, line, kind }
    }
}

#[derive(Debug, Error)]
pub enum FlowTagError {
    /// Input file is missing or cannot be opened.
    #[error("cannot open {stage} file {}: {source}", path.display())]
    Unreadable {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure after the input was opened.
    #[error("failed to read {stage}: {source}")]
    Read {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FlowTagError {
    pub fn unreadable(stage: Stage, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            stage,
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// True when the run failed because an input could not be opened.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Unreadable { stage, .. } | Self::Read { stage, .. } => *stage,
            Self::Parse(err) => err.stage,
            Self::Write { .. } => Stage::Report,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
