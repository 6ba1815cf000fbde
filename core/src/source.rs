//! Opening input files and reading the two CSV reference tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use flowtag_common::config::MalformedPolicy;
use flowtag_common::error::{FlowTagError, ParseError, ParseErrorKind, Stage};

/// Opens an input file, mapping failure to a configuration error for `stage`.
pub(crate) fn open(stage: Stage, path: &Path) -> Result<File, FlowTagError> {
    File::open(path).map_err(|e| FlowTagError::unreadable(stage, path, e))
}

/// A reader that skips the header row, trims fields and tolerates ragged rows.
pub(crate) fn reference_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(rdr)
}

pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

/// Failure of the CSV reader itself, either I/O or an undecodable row.
pub(crate) enum CsvFailure {
    Io(FlowTagError),
    Row(ParseError),
}

pub(crate) fn classify(stage: Stage, err: csv::Error) -> CsvFailure {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => CsvFailure::Io(FlowTagError::Read { stage, source }),
        _ => CsvFailure::Row(ParseError::new(
            stage,
            line,
            ParseErrorKind::Malformed(message),
        )),
    }
}

/// Reads every data row of a reference table, handing each one to `on_row`.
///
/// Rows rejected by `on_row` or by the CSV decoder are passed through the
/// malformed-row policy. Returns the number of skipped rows.
pub(crate) fn for_each_row<R, F>(
    stage: Stage,
    rdr: R,
    policy: MalformedPolicy,
    mut on_row: F,
) -> Result<u64, FlowTagError>
where
    R: Read,
    F: FnMut(&StringRecord) -> Result<(), ParseErrorKind>,
{
    let mut csv = reference_reader(rdr);
    let mut record = StringRecord::new();
    let mut skipped: u64 = 0;

    loop {
        let outcome = match csv.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => on_row(&record).map_err(|kind| ParseError::new(stage, line_of(&record), kind)),
            Err(e) => match classify(stage, e) {
                CsvFailure::Io(err) => return Err(err),
                CsvFailure::Row(err) => Err(err),
            },
        };

        if let Err(err) = outcome {
            policy.handle(err)?;
            skipped += 1;
        }
    }

    Ok(skipped)
}

/// Fails with [`ParseErrorKind::MissingFields`] when `record` is shorter than `expected`.
pub(crate) fn require_fields(record: &StringRecord, expected: usize) -> Result<(), ParseErrorKind> {
    if record.len() < expected {
        return Err(ParseErrorKind::MissingFields {
            expected,
            found: record.len(),
        });
    }
    Ok(())
}
