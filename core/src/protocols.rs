//! Builds the [`ProtocolTable`] from a protocol-number reference CSV.
//!
//! The expected layout is that of the IANA `protocol-numbers` export: the first
//! column holds a number or a `start-end` range, the second the keyword. Rows
//! with a blank keyword (unassigned or experimental numbers) are ignored.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use flowtag_common::config::MalformedPolicy;
use flowtag_common::error::{FlowTagError, ParseErrorKind, Stage};
use flowtag_common::model::{ProtocolSpec, ProtocolTable};
use tracing::{debug, info};

use crate::source;

const SPEC_COLUMN: usize = 0;
const KEYWORD_COLUMN: usize = 1;

pub fn load(path: &Path, policy: MalformedPolicy) -> Result<ProtocolTable, FlowTagError> {
    debug!("Reading protocol numbers from {}", path.display());
    let file = source::open(Stage::Protocols, path)?;
    let table = from_reader(file, policy)?;
    info!("Resolved {} protocol numbers", table.len());
    Ok(table)
}

pub fn from_reader<R: Read>(rdr: R, policy: MalformedPolicy) -> Result<ProtocolTable, FlowTagError> {
    let mut table = ProtocolTable::new();

    let skipped = source::for_each_row(Stage::Protocols, rdr, policy, |record| {
        if let Some((spec, keyword)) = parse_row(record)? {
            table.insert(spec, keyword);
        }
        Ok(())
    })?;

    if skipped > 0 {
        debug!("Skipped {skipped} malformed protocol rows");
    }
    Ok(table)
}

/// `Ok(None)` for rows without a keyword, checked before the number column is parsed.
fn parse_row(record: &StringRecord) -> Result<Option<(ProtocolSpec, &str)>, ParseErrorKind> {
    source::require_fields(record, KEYWORD_COLUMN + 1)?;

    let keyword = &record[KEYWORD_COLUMN];
    if keyword.is_empty() {
        return Ok(None);
    }

    let spec = ProtocolSpec::from_str(&record[SPEC_COLUMN])?;
    Ok(Some((spec, keyword)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
