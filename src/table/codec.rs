//! Delimited-text encoding
//!
//! Sections of one table may differ in width, so both directions run the
//! `csv` crate in flexible mode.

use super::types::{Row, Table};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{Read, Write};

/// Write a table as comma-separated text, one record per row
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    for row in table.rows() {
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Encode a table to CSV bytes
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

/// Decode CSV text back into rows. No row is treated as a header.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(String::from).collect())
                .map_err(Error::from)
        })
        .collect()
}
