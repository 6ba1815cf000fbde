//! # Flow Log Record
//!
//! Only the default (version 2) flow-log layout is understood:
//!
//! ```text
//! version account-id interface-id srcaddr dstaddr srcport dstport protocol packets bytes start end action log-status
//! ```
//!
//! Of those fields only `dstport` and `protocol` are consumed.

use std::str::FromStr;

use crate::error::ParseErrorKind;

/// 0-indexed position of the destination port.
pub const DST_PORT_FIELD: usize = 6;
/// 0-indexed position of the IANA protocol number.
pub const PROTOCOL_FIELD: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord {
    pub dst_port: u32,
    pub protocol: u32,
}

impl FromStr for FlowRecord {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() <= PROTOCOL_FIELD {
            return Err(ParseErrorKind::MissingFields {
                expected: PROTOCOL_FIELD + 1,
                found: fields.len(),
            });
        }

        let dst_port = fields[DST_PORT_FIELD].parse::<u32>().map_err(|_| {
            ParseErrorKind::InvalidNumber {
                field: "destination port",
                value: fields[DST_PORT_FIELD].to_string(),
            }
        })?;

        let protocol = fields[PROTOCOL_FIELD].parse::<u32>().map_err(|_| {
            ParseErrorKind::InvalidNumber {
                field: "protocol number",
                value: fields[PROTOCOL_FIELD].to_string(),
            }
        })?;

        Ok(Self { dst_port, protocol })
    }
}
