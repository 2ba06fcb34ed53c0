//! CSV feeds producing ledger transactions and bank statements
//!
//! Both feed shapes carry a header row, which is skipped, followed by one record
//! per row. A single malformed row aborts the whole feed.

pub mod ledger;
pub mod statement;

pub use ledger::*;
pub use statement::*;

use std::io::Read;

use crate::types::*;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Read every data row, checking its column count and handing it to `parse`.
///
/// Errors raised while parsing a row are tagged with its 1-based data line.
fn read_rows<R, T, F>(reader: R, columns: usize, mut parse: F) -> ReconciliationResult<Vec<T>>
where
    R: Read,
    F: FnMut(&csv::StringRecord) -> ReconciliationResult<T>,
{
    let mut rdr = csv_reader(reader);
    let mut out = Vec::new();

    for (index, record) in rdr.records().enumerate() {
        let line = index + 1;
        let record = record?;
        if record.len() != columns {
            return Err(ReconciliationError::InvalidRowShape {
                expected: columns,
                found: record.len(),
            }
            .at_line(line));
        }
        out.push(parse(&record).map_err(|err| err.at_line(line))?);
    }

    Ok(out)
}
