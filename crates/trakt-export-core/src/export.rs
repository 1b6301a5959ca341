// CSV output of export rows

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;
use trakt_export_models::{ExportRow, SortOrder};

use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub sort: SortOrder,
}

impl CsvOptions {
    pub fn new(delimiter: &str, sort: SortOrder) -> Result<Self, ExportError> {
        match delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(Self {
                delimiter: *byte,
                sort,
            }),
            _ => Err(ExportError::InvalidDelimiter(delimiter.to_string())),
        }
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sort: SortOrder::Desc,
        }
    }
}

/// Stable sort by the timestamp text (ISO 8601 sorts lexically)
pub fn sort_rows(rows: &mut [ExportRow], order: SortOrder) {
    match order {
        SortOrder::Asc => rows.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortOrder::Desc => rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
    }
}

/// Write `rows` to `writer`: one header taken from the first row's field
/// names, then one record per row. Returns the number of records.
pub fn write_rows<W: Write>(writer: W, rows: &[ExportRow], options: &CsvOptions) -> Result<usize, ExportError> {
    let Some(first) = rows.first() else {
        return Ok(0);
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(first.field_names())?;
    for row in rows {
        csv_writer.write_record(row.values())?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

/// Sort and write the rows to `path`, replacing any existing file
pub fn write_csv(path: &Path, rows: &mut [ExportRow], options: &CsvOptions) -> Result<usize, ExportError> {
    sort_rows(rows, options.sort);
    let file = File::create(path)?;
    let written = write_rows(file, rows, options)?;
    info!(
        operation = "write_csv",
        path = %path.display(),
        rows = written,
        "Exported {} rows to {}",
        written,
        path.display()
    );
    Ok(written)
}
