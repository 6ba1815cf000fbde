//! The flow-log pass: classifies every record against the protocol and lookup
//! tables and accumulates [`TagCounts`] and [`PortProtocolCounts`].
//!
//! Counters live in the returned [`FlowSummary`], nothing is kept between calls.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use flowtag_common::config::MalformedPolicy;
use flowtag_common::error::{FlowTagError, ParseError, Stage};
use flowtag_common::model::{FlowRecord, LookupTable, PortProtocolCounts, ProtocolTable, TagCounts};
use tracing::{debug, info};

use crate::source;

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSummary {
    pub tag_counts: TagCounts,
    pub port_protocol_counts: PortProtocolCounts,
    /// Records counted in both tables.
    pub records: u64,
    /// Malformed lines left out under [`MalformedPolicy::Skip`].
    pub skipped: u64,
}

/// How a single record resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub protocol: Option<&'a str>,
    /// Only set when `protocol` resolved as well.
    pub tag: Option<&'a str>,
}

pub struct Aggregator<'a> {
    protocols: &'a ProtocolTable,
    lookup: &'a LookupTable,
    policy: MalformedPolicy,
}

impl<'a> Aggregator<'a> {
    pub fn new(protocols: &'a ProtocolTable, lookup: &'a LookupTable) -> Self {
        Self {
            protocols,
            lookup,
            policy: MalformedPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn classify(&self, record: &FlowRecord) -> Classification<'a> {
        let protocol = self.protocols.keyword(record.protocol);
        let tag = protocol.and_then(|keyword| self.lookup.tag(keyword, record.dst_port));
        Classification { protocol, tag }
    }

    pub fn aggregate_file(&self, path: &Path) -> Result<FlowSummary, FlowTagError> {
        debug!("Reading flow log from {}", path.display());
        let file = source::open(Stage::FlowLog, path)?;
        let summary = self.aggregate(BufReader::new(file))?;
        info!(
            "Counted {} flow records into {} port/protocol combinations",
            summary.records,
            summary.port_protocol_counts.len()
        );
        Ok(summary)
    }

    /// Reads every line of `reader`.
    ///
    /// Blank lines are not records: they are skipped under either policy and never
    /// counted as malformed. Lines are decoded lossily, so undecodable bytes in
    /// fields other than `dstport` and `protocol` do not affect the record.
    pub fn aggregate<R: BufRead>(&self, mut reader: R) -> Result<FlowSummary, FlowTagError> {
        let mut summary = FlowSummary {
            tag_counts: TagCounts::seeded(self.lookup),
            port_protocol_counts: PortProtocolCounts::new(),
            records: 0,
            skipped: 0,
        };

        let mut buf = Vec::new();
        let mut line_no: u64 = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| FlowTagError::Read {
                    stage: Stage::FlowLog,
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                debug!("Flow log line {line_no} is blank");
                continue;
            }

            let record = match FlowRecord::from_str(&line) {
                Ok(record) => record,
                Err(kind) => {
                    self.policy
                        .handle(ParseError::new(Stage::FlowLog, line_no, kind))?;
                    summary.skipped += 1;
                    continue;
                }
            };

            let Classification { protocol, tag } = self.classify(&record);
            summary.tag_counts.record(tag);
            summary
                .port_protocol_counts
                .record(record.dst_port, protocol);
            summary.records += 1;
        }

        Ok(summary)
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
