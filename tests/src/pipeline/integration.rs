#![cfg(test)]
use std::fs;
use std::path::Path;

use flowtag_common::config::{Config, MalformedPolicy};
use flowtag_common::error::Stage;
use flowtag_core::pipeline::{self, RunSummary};
use flowtag_core::{lookup, protocols};
use tempfile::TempDir;

use super::fixture;

const EXPECTED_REPORT: &str = "\
Tag Counts:
Tag,Count
SV_P3,0
Untagged,8
email,3
sv_P1,2
sv_P2,1
sv_P4,0
sv_P5,0

Count of matches for each port/protocol combination:
Port/Protocol Combination Counts:
Port,Protocol,Count

23,tcp,1
25,tcp,1
80,tcp,1
110,tcp,1
143,tcp,1
443,tcp,1
993,tcp,1
1024,tcp,1
49153,tcp,1
49154,tcp,1
49155,tcp,1
49156,tcp,1
49157,tcp,1
49158,tcp,1
";

fn fixture_config(dir: &TempDir) -> Config {
    let mut cfg = Config::new(
        fixture("protocol-numbers.csv"),
        fixture("lookup.csv"),
        fixture("flow-log.txt"),
    );
    cfg.output_file = dir.path().join("output.txt");
    cfg
}

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write test input");
    path
}

#[test]
fn protocol_fixture_resolves_known_numbers() {
    let table = protocols::load(&fixture("protocol-numbers.csv"), MalformedPolicy::Abort)
        .expect("protocol fixture should load");

    assert_eq!(table.keyword(6), Some("tcp"));
    assert_eq!(table.keyword(17), Some("udp"));
    assert_eq!(table.keyword(9), Some("igp"));
    assert!(!table.contains(99), "protocol 99 has no keyword");
    assert!(!table.contains(200), "protocol 200 is unassigned");
    assert_eq!(table.len(), 22);
}

#[test]
fn lookup_fixture_builds_nested_table() -> anyhow::Result<()> {
    let table = lookup::load(&fixture("lookup.csv"), MalformedPolicy::Abort)?;

    assert_eq!(table.tag("tcp", 25), Some("sv_P1"));
    assert_eq!(table.tag("udp", 68), Some("sv_P2"));
    assert!(!table.has_protocol("epg"));
    assert_eq!(table.tag("tcp", 9999), None);
    Ok(())
}

#[test]
fn fixture_run_produces_expected_report() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fixture_config(&dir);

    let summary: RunSummary = pipeline::run(&cfg).expect("pipeline run failed");

    let flows = &summary.flows;
    assert_eq!(flows.records, 14);
    assert_eq!(flows.skipped, 0);
    assert_eq!(flows.tag_counts.get("sv_P1"), Some(2));
    assert_eq!(flows.tag_counts.get("sv_P2"), Some(1));
    assert_eq!(flows.tag_counts.get("SV_P3"), Some(0));
    assert_eq!(flows.tag_counts.get("sv_P4"), Some(0));
    assert_eq!(flows.tag_counts.get("sv_P5"), Some(0));
    assert_eq!(flows.tag_counts.get("email"), Some(3));
    assert_eq!(flows.tag_counts.untagged(), 8);
    assert_eq!(flows.tag_counts.total(), 14);
    assert_eq!(flows.port_protocol_counts.len(), 14);
    assert_eq!(flows.port_protocol_counts.total(), 14);
    assert_eq!(summary.lookup_entries, 11);

    let written = fs::read_to_string(&cfg.output_file).unwrap();
    assert_eq!(written, EXPECTED_REPORT);
}

#[test]
fn empty_flow_log_reports_zero_counts() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fixture_config(&dir);
    cfg.flow_log_file = write_file(dir.path(), "empty.txt", "");

    let summary = pipeline::run(&cfg).expect("pipeline run failed");

    assert_eq!(summary.flows.records, 0);
    assert_eq!(summary.flows.tag_counts.iter().count(), 7);
    assert!(summary.flows.tag_counts.iter().all(|(_, count)| count == 0));
    assert!(summary.flows.port_protocol_counts.is_empty());

    let written = fs::read_to_string(&cfg.output_file).unwrap();
    assert!(written.ends_with("Port,Protocol,Count\n\n"));
}

#[test]
fn unknown_protocol_number_is_reported_as_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fixture_config(&dir);
    cfg.flow_log_file = write_file(
        dir.path(),
        "log.txt",
        "2 123456789012 eni-1 10.0.0.1 10.0.0.2 5000 25 200 1 40 1620140761 1620140821 ACCEPT OK\n",
    );

    let summary = pipeline::run(&cfg).expect("pipeline run failed");

    assert_eq!(summary.flows.tag_counts.untagged(), 1);
    assert_eq!(summary.flows.tag_counts.get("sv_P1"), Some(0));
    assert_eq!(summary.flows.port_protocol_counts.get(25, None), Some(1));

    let written = fs::read_to_string(&cfg.output_file).unwrap();
    assert!(written.contains("\n25,unknown,1\n"));
}

#[test]
fn wide_numbers_and_stray_bytes_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fixture_config(&dir);
    let log = dir.path().join("log.txt");
    let mut contents: Vec<u8> = Vec::new();
    contents.extend_from_slice(
        b"2 123456789012 eni-\xfe 10.0.0.1 10.0.0.2 5000 25 256 1 40 1620140761 1620140821 ACCEPT OK\n",
    );
    contents.extend_from_slice(
        b"2 123456789012 eni-1 10.0.0.1 10.0.0.2 5000 70000 6 1 40 1620140761 1620140821 ACCEPT OK\n",
    );
    fs::write(&log, contents).unwrap();
    cfg.flow_log_file = log;

    let summary = pipeline::run(&cfg).expect("pipeline run failed");

    assert_eq!(summary.flows.records, 2);
    assert_eq!(summary.flows.tag_counts.untagged(), 2);
    let written = fs::read_to_string(&cfg.output_file).unwrap();
    assert!(written.contains("\n25,unknown,1\n"));
    assert!(written.ends_with("\n70000,tcp,1\n"));
}

#[test]
fn missing_input_fails_without_writing_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fixture_config(&dir);
    cfg.lookup_file = dir.path().join("missing.csv");

    let err = pipeline::run(&cfg).unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.stage(), Stage::Lookup);
    assert!(!cfg.output_file.exists(), "no partial report expected");
}

#[test]
fn malformed_flow_line_aborts_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fixture_config(&dir);
    let good = fs::read_to_string(fixture("flow-log.txt")).unwrap();
    cfg.flow_log_file = write_file(dir.path(), "log.txt", &format!("{good}2 truncated line\n"));

    let err = pipeline::run(&cfg).unwrap_err();

    assert!(err.is_parse());
    assert_eq!(err.stage(), Stage::FlowLog);
    assert!(err.to_string().contains("line 15"));
    assert!(!cfg.output_file.exists());
}

#[test]
fn malformed_flow_line_skipped_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fixture_config(&dir);
    cfg.on_malformed = MalformedPolicy::Skip;
    let good = fs::read_to_string(fixture("flow-log.txt")).unwrap();
    cfg.flow_log_file = write_file(dir.path(), "log.txt", &format!("2 truncated line\n{good}"));

    let summary = pipeline::run(&cfg).expect("pipeline run failed");

    assert_eq!(summary.flows.records, 14);
    assert_eq!(summary.flows.skipped, 1);
    assert_eq!(
        fs::read_to_string(&cfg.output_file).unwrap(),
        EXPECTED_REPORT
    );
}

#[test]
fn runs_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fixture_config(&dir);

    let first = pipeline::run(&cfg).expect("first run failed");
    let second = pipeline::run(&cfg).expect("second run failed");

    assert_eq!(first, second);
    assert_eq!(second.flows.tag_counts.total(), 14);
}
