//! Table module
//!
//! Turns flatten inputs into header/row tables and encodes them as CSV.
//!
//! # Overview
//!
//! This module provides:
//! - `materialize` - renders one record as a row plus `date_processed`
//! - `TableBuilder` - assembles sections from a list of inputs
//! - CSV encoding and decoding of finished tables

mod builder;
mod clock;
mod codec;
mod materialize;
mod types;

pub use builder::{RejectedInput, TableBuild, TableBuilder};
pub use clock::{
    format_timestamp, Clock, FixedClock, SystemClock, TimestampZone, DATE_PROCESSED,
    DATE_PROCESSED_FORMAT,
};
pub use codec::{read_csv, to_csv_bytes, write_csv};
pub use materialize::{format_cell, header_row, materialize, UNRENDERABLE};
pub use types::{Row, Table};

#[cfg(test)]
mod tests;
