use std::collections::{BTreeSet, HashMap};

/// Protocol keyword to (destination port to tag).
///
/// A protocol with no rows has no inner map, lookups against it simply miss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    by_protocol: HashMap<String, HashMap<u32, String>>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any tag already stored for the same (protocol, port) pair.
    pub fn insert(&mut self, protocol: &str, port: u32, tag: &str) {
        self.by_protocol
            .entry(protocol.trim().to_string())
            .or_default()
            .insert(port, tag.trim().to_string());
    }

    pub fn tag(&self, protocol: &str, port: u32) -> Option<&str> {
        self.by_protocol
            .get(protocol)
            .and_then(|ports| ports.get(&port))
            .map(String::as_str)
    }

    pub fn has_protocol(&self, protocol: &str) -> bool {
        self.by_protocol.contains_key(protocol)
    }

    /// Every distinct tag across all protocols.
    pub fn tags(&self) -> BTreeSet<&str> {
        self.by_protocol
            .values()
            .flat_map(|ports| ports.values())
            .map(String::as_str)
            .collect()
    }

    /// Number of (protocol, port) entries.
    pub fn len(&self) -> usize {
        self.by_protocol.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
