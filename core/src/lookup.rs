//! Builds the [`LookupTable`] from a `dstport,protocol,tag` CSV.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use flowtag_common::config::MalformedPolicy;
use flowtag_common::error::{FlowTagError, ParseErrorKind, Stage};
use flowtag_common::model::LookupTable;
use tracing::{debug, info};

use crate::source;

const PORT_COLUMN: usize = 0;
const PROTOCOL_COLUMN: usize = 1;
const TAG_COLUMN: usize = 2;

/// Separates columns in the written report, so a tag may not contain it.
const REPORT_DELIMITER: char = ',';

pub fn load(path: &Path, policy: MalformedPolicy) -> Result<LookupTable, FlowTagError> {
    debug!("Reading lookup table from {}", path.display());
    let file = source::open(Stage::Lookup, path)?;
    let table = from_reader(file, policy)?;
    info!(
        "Loaded {} lookup entries carrying {} tags",
        table.len(),
        table.tags().len()
    );
    Ok(table)
}

pub fn from_reader<R: Read>(rdr: R, policy: MalformedPolicy) -> Result<LookupTable, FlowTagError> {
    let mut table = LookupTable::new();

    let skipped = source::for_each_row(Stage::Lookup, rdr, policy, |record| {
        let (port, protocol, tag) = parse_row(record)?;
        table.insert(protocol, port, tag);
        Ok(())
    })?;

    if skipped > 0 {
        debug!("Skipped {skipped} malformed lookup rows");
    }
    Ok(table)
}

fn parse_row(record: &StringRecord) -> Result<(u32, &str, &str), ParseErrorKind> {
    source::require_fields(record, TAG_COLUMN + 1)?;

    let port_str = &record[PORT_COLUMN];
    let port = port_str
        .parse::<u32>()
        .map_err(|_| ParseErrorKind::InvalidNumber {
            field: "destination port",
            value: port_str.to_string(),
        })?;

    let tag = &record[TAG_COLUMN];
    if tag.contains(REPORT_DELIMITER) {
        return Err(ParseErrorKind::Malformed(format!(
            "tag {tag:?} contains '{REPORT_DELIMITER}'"
        )));
    }

    Ok((port, &record[PROTOCOL_COLUMN], tag))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
