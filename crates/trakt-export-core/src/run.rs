use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument, warn};
use trakt_export_models::{CleanupTally, IdFormat, ItemKind, RequestContext};
use trakt_export_source::ListSource;

use crate::cleanup::{clean_list, remove_duplicates};
use crate::duplicates::{find_duplicates, select_for_removal};
use crate::error::ExportError;
use crate::export::{write_csv, CsvOptions};
use crate::normalize::normalize_all;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output: PathBuf,
    pub csv: CsvOptions,
    /// Remove every fetched entry from the list after the export
    pub clean: bool,
    /// Remove all but the first entry of each duplicated identifier
    pub remove_duplicates: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub list: String,
    pub item_kind: ItemKind,
    pub id_format: IdFormat,
    pub format_forced: bool,
    pub output: PathBuf,
    pub fetched: usize,
    pub rows_written: usize,
    pub duplicates: Vec<String>,
    pub cleanup: Option<CleanupTally>,
    pub duplicate_cleanup: Option<CleanupTally>,
    pub duration_ms: u64,
}

/// One export run: fetch, normalize, write, then the optional cleanup passes
pub struct ExportJob<'a> {
    source: &'a dyn ListSource,
    ctx: RequestContext,
    options: ExportOptions,
}

impl<'a> ExportJob<'a> {
    pub fn new(source: &'a dyn ListSource, ctx: RequestContext, options: ExportOptions) -> Self {
        Self { source, ctx, options }
    }

    #[instrument(skip(self), fields(list = %self.ctx.list_label(), kind = %self.ctx.item_kind()))]
    pub async fn run(&self) -> Result<ExportSummary, ExportError> {
        let start = Instant::now();
        let ctx = &self.ctx;

        if ctx.format_forced() {
            info!(
                "{} has no {} id, exporting {} ids instead",
                ctx.item_kind(),
                ctx.requested_format(),
                ctx.id_format()
            );
        }

        info!(operation = "fetch", source = self.source.source_name(), "Fetching {} {}", ctx.list_label(), ctx.item_kind());
        let items = self.source.fetch_all(ctx).await?;
        if items.is_empty() {
            return Err(ExportError::NoItems(format!("{} in {}", ctx.item_kind(), ctx.list_label())));
        }
        info!(operation = "fetch", count = items.len(), "Fetched {} {}", items.len(), ctx.item_kind());

        let mut normalized = normalize_all(&items, ctx);
        if normalized.rows.is_empty() {
            return Err(ExportError::EmptyExport {
                fetched: items.len(),
                kind: ctx.item_kind().to_string(),
                format: ctx.id_format().to_string(),
            });
        }

        let rows_written = write_csv(&self.options.output, &mut normalized.rows, &self.options.csv)?;

        let cleanup = if self.options.clean {
            Some(clean_list(self.source, ctx, &items).await)
        } else {
            None
        };

        let duplicates = find_duplicates(&normalized.ids);
        info!(
            operation = "duplicates",
            "Found {} duplicate out of {} {}",
            duplicates.len(),
            normalized.ids.len(),
            ctx.item_kind()
        );

        let duplicate_cleanup = if self.options.remove_duplicates {
            if !duplicates.is_empty() {
                info!("{:?}", duplicates);
            }
            let refs = select_for_removal(&items, &duplicates, ctx);
            Some(remove_duplicates(self.source, ctx, refs, duplicates.len()).await)
        } else {
            if !duplicates.is_empty() {
                warn!(count = duplicates.len(), "Duplicates left in place");
            }
            None
        };

        Ok(ExportSummary {
            list: ctx.list_label().to_string(),
            item_kind: ctx.item_kind(),
            id_format: ctx.id_format(),
            format_forced: ctx.format_forced(),
            output: self.options.output.clone(),
            fetched: items.len(),
            rows_written,
            duplicates,
            cleanup,
            duplicate_cleanup,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
