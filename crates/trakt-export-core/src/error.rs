use thiserror::Error;
use trakt_export_source::TraktError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No {0} found in the list, nothing to export")]
    NoItems(String),
    #[error("No data to export: none of the {fetched} fetched {kind} has a {format} id")]
    EmptyExport {
        fetched: usize,
        kind: String,
        format: String,
    },
    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Source(#[from] TraktError),
}
