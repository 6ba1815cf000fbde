use colored::*;

use crate::terminal::{colors, print};
use flowtag_common::config::Config;
use flowtag_common::model::UNTAGGED;
use flowtag_core::pipeline::{self, RunSummary};

type Detail = (String, ColoredString);

pub fn run(cfg: &Config) -> anyhow::Result<()> {
    print_inputs(cfg);

    print::header("parsing flow logs", cfg.quiet);
    let summary: RunSummary = pipeline::run(cfg)?;

    print_tag_counts(&summary, cfg.quiet);
    print_summary(&summary, cfg);
    Ok(())
}

fn print_inputs(cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    print::header("input files", cfg.quiet);
    let paths: Vec<Detail> = [
        ("Protocol file", &cfg.protocol_file),
        ("Lookup table", &cfg.lookup_file),
        ("Flow log", &cfg.flow_log_file),
        ("Output file", &cfg.output_file),
    ]
    .into_iter()
    .map(|(key, path)| (key.to_string(), path.display().to_string().color(colors::PATH)))
    .collect();
    print::aligned_block(paths);
}

fn print_tag_counts(summary: &RunSummary, q_level: u8) {
    if q_level > 0 {
        return;
    }

    print::header("tag counts", q_level);
    let counts: Vec<Detail> = summary
        .flows
        .tag_counts
        .iter()
        .map(|(tag, count)| {
            let value: ColoredString = match (tag, count) {
                (UNTAGGED, _) => count.to_string().color(colors::UNTAGGED),
                (_, 0) => count.to_string().dimmed(),
                _ => count.to_string().color(colors::ACCENT).bold(),
            };
            (tag.to_string(), value)
        })
        .collect();
    print::aligned_block(counts);
}

fn print_summary(summary: &RunSummary, cfg: &Config) {
    let flows = &summary.flows;
    let records: ColoredString = format!("{} records", flows.records).bold().green();
    let combinations: ColoredString =
        format!("{} port/protocol combinations", flows.port_protocol_counts.len())
            .bold()
            .yellow();

    print::fat_separator(cfg.quiet);
    print::print_status(format!(
        "Parsed {records} into {combinations} using {} protocol numbers and {} lookup entries",
        summary.protocols, summary.lookup_entries
    ));
    if flows.skipped > 0 {
        print::print_status(format!(
            "{} malformed lines skipped",
            flows.skipped.to_string().color(colors::UNTAGGED)
        ));
    }
    print::print_status(format!(
        "Output written to {}",
        cfg.output_file.display().to_string().color(colors::PATH)
    ));
}
