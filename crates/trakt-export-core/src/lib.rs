pub mod cleanup;
pub mod duplicates;
pub mod error;
pub mod export;
pub mod normalize;
pub mod run;

#[cfg(test)]
pub(crate) mod testing;

pub use cleanup::{clean_list, remove_duplicates, RemovalQueue, REMOVAL_BATCH_SIZE};
pub use duplicates::{find_duplicates, select_for_removal};
pub use error::ExportError;
pub use export::{sort_rows, write_csv, write_rows, CsvOptions};
pub use normalize::{normalize, normalize_all, Normalized};
pub use run::{ExportJob, ExportOptions, ExportSummary};
