//! Runs the whole batch: protocol table, lookup table, flow log, report.
//!
//! Each stage opens and closes its own file. The report is only created once
//! every input stage has succeeded.

use flowtag_common::config::Config;
use flowtag_common::error::FlowTagError;
use tracing::info_span;

use crate::aggregator::{Aggregator, FlowSummary};
use crate::{lookup, protocols, report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Protocol numbers with a keyword.
    pub protocols: usize,
    /// (protocol, port) entries in the lookup table.
    pub lookup_entries: usize,
    pub flows: FlowSummary,
}

pub fn run(cfg: &Config) -> Result<RunSummary, FlowTagError> {
    let span = info_span!("pipeline");
    let _guard = span.enter();

    let protocol_table = protocols::load(&cfg.protocol_file, cfg.on_malformed)?;
    let lookup_table = lookup::load(&cfg.lookup_file, cfg.on_malformed)?;

    let flows = Aggregator::new(&protocol_table, &lookup_table)
        .with_policy(cfg.on_malformed)
        .aggregate_file(&cfg.flow_log_file)?;

    report::write_to_path(&cfg.output_file, &flows)?;

    Ok(RunSummary {
        protocols: protocol_table.len(),
        lookup_entries: lookup_table.len(),
        flows,
    })
}
