//! Plain-text report of a [`FlowSummary`].
//!
//! ```text
//! Tag Counts:
//! Tag,Count
//! sv_P1,2
//! Untagged,8
//!
//! Count of matches for each port/protocol combination:
//! Port/Protocol Combination Counts:
//! Port,Protocol,Count
//!
//! 25,tcp,1
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flowtag_common::error::FlowTagError;
use tracing::info;

use crate::aggregator::FlowSummary;

pub fn write<W: Write>(mut out: W, summary: &FlowSummary) -> io::Result<()> {
    writeln!(out, "Tag Counts:")?;
    writeln!(out, "Tag,Count")?;
    for (tag, count) in summary.tag_counts.iter() {
        writeln!(out, "{tag},{count}")?;
    }

    writeln!(out)?;
    writeln!(out, "Count of matches for each port/protocol combination:")?;
    writeln!(out, "Port/Protocol Combination Counts:")?;
    writeln!(out, "Port,Protocol,Count")?;
    writeln!(out)?;
    for (combination, count) in summary.port_protocol_counts.iter() {
        writeln!(out, "{combination},{count}")?;
    }

    out.flush()
}

pub fn render(summary: &FlowSummary) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(&mut buf, summary);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Creates (or truncates) `path` and writes the report into it.
pub fn write_to_path(path: &Path, summary: &FlowSummary) -> Result<(), FlowTagError> {
    let file = File::create(path).map_err(|e| FlowTagError::write(path, e))?;
    write(BufWriter::new(file), summary).map_err(|e| FlowTagError::write(path, e))?;
    info!("Report written to {}", path.display());
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
