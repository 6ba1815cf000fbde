//! # Protocol Number Model
//!
//! Resolves IANA protocol numbers (e.g. `6`, `17`) to lowercase keywords (`tcp`, `udp`).
//!
//! Reference rows address numbers either one at a time or as an inclusive
//! `start-end` range, both represented by [`ProtocolSpec`].

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ParseErrorKind;

/// An inclusive range of protocol numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolRange {
    pub start: u32,
    pub end: u32,
}

impl ProtocolRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Empty when `start > end`.
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// The number column of a protocol reference row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolSpec {
    Single(u32),
    Range(ProtocolRange),
}

impl ProtocolSpec {
    pub fn numbers(&self) -> RangeInclusive<u32> {
        match *self {
            ProtocolSpec::Single(number) => ProtocolRange::new(number, number).iter(),
            ProtocolSpec::Range(range) => range.iter(),
        }
    }
}

impl FromStr for ProtocolSpec {
    type Err = ParseErrorKind;

    /// Parses either `"6"` or `"146-252"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let Some((start_str, end_str)) = s.split_once('-') else {
            return parse_number(s).map(ProtocolSpec::Single);
        };

        let (Ok(start), Ok(end)) = (parse_number(start_str), parse_number(end_str)) else {
            return Err(ParseErrorKind::MalformedRange(s.to_string()));
        };

        Ok(ProtocolSpec::Range(ProtocolRange::new(start, end)))
    }
}

fn parse_number(s: &str) -> Result<u32, ParseErrorKind> {
    let s = s.trim();
    s.parse::<u32>().map_err(|_| ParseErrorKind::InvalidNumber {
        field: "protocol number",
        value: s.to_string(),
    })
}

/// Protocol number to lowercase keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolTable {
    keywords: HashMap<u32, String>,
}

impl ProtocolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every number addressed by `spec` to `keyword`, replacing earlier entries.
    pub fn insert(&mut self, spec: ProtocolSpec, keyword: &str) {
        let keyword = keyword.trim().to_lowercase();
        for number in spec.numbers() {
            self.keywords.insert(number, keyword.clone());
        }
    }

    pub fn keyword(&self, number: u32) -> Option<&str> {
        self.keywords.get(&number).map(String::as_str)
    }

    pub fn contains(&self, number: u32) -> bool {
        self.keywords.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
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
