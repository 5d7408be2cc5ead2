//! The `format` command: delimited file in, canonical GTFS CSV out.
//!
//! Reads every record into a column-major [`Frame`] of raw string cells
//! (empty fields become missing), canonicalizes, and writes the result with
//! every field quoted. Cell-level oddities never abort the run; only
//! structural problems (unreadable file, ragged records) do.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    canon::{CanonicalFrame, canonicalize},
    cli::FormatArgs,
    frame::{Column, Frame},
    io_utils,
    value::Value,
};

pub fn execute(args: &FormatArgs) -> Result<()> {
    let input_delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let output_delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref(),
        args.output_delimiter,
        input_delimiter,
    );
    info!(
        "Formatting '{}' with delimiter '{}'",
        args.input.display(),
        crate::printable_delimiter(input_delimiter)
    );

    let frame = read_frame(args, input_delimiter)?;
    debug!(
        "Loaded {} column(s), {} row(s)",
        frame.column_count(),
        frame.row_count()
    );
    let canonical = canonicalize(&frame);
    write_canonical(&canonical, args, output_delimiter)?;
    info!(
        "Wrote {} row(s) across {} column(s)",
        canonical.row_count(),
        canonical.column_count()
    );
    Ok(())
}

fn read_frame(args: &FormatArgs, delimiter: u8) -> Result<Frame> {
    let mut reader = io_utils::open_csv_reader(&args.input, delimiter)?;
    let headers = reader
        .headers()
        .with_context(|| format!("Reading headers from {:?}", args.input))?
        .clone();

    let mut columns: Vec<Vec<Option<Value>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.with_context(|| format!("Reading record from {:?}", args.input))?;
        for (idx, field) in record.iter().enumerate() {
            let cell = if field.is_empty() {
                None
            } else {
                Some(Value::String(field.to_string()))
            };
            columns[idx].push(cell);
        }
    }

    let columns = headers
        .iter()
        .zip(columns)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Frame::new(columns).with_context(|| format!("Assembling table from {:?}", args.input))
}

fn write_canonical(canonical: &CanonicalFrame, args: &FormatArgs, delimiter: u8) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(args.output.as_deref(), delimiter)?;
    writer
        .write_record(canonical.headers())
        .context("Writing header record")?;
    for (index, row) in canonical.rows().enumerate() {
        writer
            .write_record(row)
            .with_context(|| format!("Writing record {}", index + 1))?;
    }
    writer.flush().context("Flushing output")?;
    Ok(())
}
