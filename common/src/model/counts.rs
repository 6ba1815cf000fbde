//! # Aggregate Counters
//!
//! [`TagCounts`] and [`PortProtocolCounts`] are plain values produced by one
//! aggregation pass. Both iterate in a stable order so the report is reproducible.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::lookup::LookupTable;

/// Bucket for records whose protocol or (protocol, port) pair has no tag.
pub const UNTAGGED: &str = "Untagged";

/// Rendered in place of a protocol keyword the protocol table could not resolve.
pub const UNRESOLVED_PROTOCOL: &str = "unknown";

/// Occurrences per tag, keyed lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCounts {
    counts: BTreeMap<String, u64>,
}

impl TagCounts {
    /// Zero for every tag in `lookup`, plus [`UNTAGGED`].
    pub fn seeded(lookup: &LookupTable) -> Self {
        let mut counts: BTreeMap<String, u64> = lookup
            .tags()
            .into_iter()
            .map(|tag| (tag.to_string(), 0))
            .collect();
        counts.insert(UNTAGGED.to_string(), 0);
        Self { counts }
    }

    /// Counts one record against `tag`, or against [`UNTAGGED`] when `tag` is `None`
    /// or was never seeded.
    pub fn record(&mut self, tag: Option<&str>) {
        match tag.and_then(|tag| self.counts.get_mut(tag)) {
            Some(count) => *count += 1,
            None => *self.counts.entry(UNTAGGED.to_string()).or_insert(0) += 1,
        }
    }

    pub fn get(&self, tag: &str) -> Option<u64> {
        self.counts.get(tag).copied()
    }

    pub fn untagged(&self) -> u64 {
        self.get(UNTAGGED).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Destination port paired with the resolved protocol keyword, `None` when unresolved.
///
/// Orders by port first; an unresolved protocol sorts before any keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortProtocol {
    pub port: u32,
    pub protocol: Option<String>,
}

impl PortProtocol {
    pub fn new(port: u32, protocol: Option<&str>) -> Self {
        Self {
            port,
            protocol: protocol.map(str::to_string),
        }
    }

    pub fn protocol_name(&self) -> &str {
        self.protocol.as_deref().unwrap_or(UNRESOLVED_PROTOCOL)
    }
}

impl fmt::Display for PortProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.port, self.protocol_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortProtocolCounts {
    counts: BTreeMap<PortProtocol, u64>,
}

impl PortProtocolCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, port: u32, protocol: Option<&str>) {
        *self
            .counts
            .entry(PortProtocol::new(port, protocol))
            .or_insert(0) += 1;
    }

    pub fn get(&self, port: u32, protocol: Option<&str>) -> Option<u64> {
        self.counts.get(&PortProtocol::new(port, protocol)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PortProtocol, u64)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
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
