//! CSV export of stored history records.

use std::io::Write;

use crate::storage::ClientRecord;

/// Writes the history as CSV: a header row derived from the record
/// fields, then one row per record.
pub fn write_history_csv<W: Write>(
    records: &[ClientRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders the history to an in-memory CSV document.
pub fn history_csv(records: &[ClientRecord]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_history_csv(records, &mut buffer)?;
    // The csv writer only ever emits valid UTF-8
    Ok(String::from_utf8(buffer).unwrap_or_default())
}
