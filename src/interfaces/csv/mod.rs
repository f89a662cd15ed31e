//! CSV import and export.
//!
//! Exports quote every field and separate rows with a bare `\n`. There is no
//! newline after the last row.

pub mod adjustment_reader;
pub mod employee_writer;
pub mod payslip_writer;

use crate::error::{PayrollError, Result};
use std::io::Write;

fn quoted_writer<W: Write>(sink: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink)
}

fn into_inner<W: Write>(writer: csv::Writer<W>) -> Result<W> {
    writer
        .into_inner()
        .map_err(|e| PayrollError::IoError(e.into_error()))
}

fn without_final_newline(bytes: Vec<u8>) -> String {
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
