use super::lists::print_lists;
use super::progress::Spinner;
use super::prompts::prompt_string;
use super::session::connect;
use crate::output::{Output, OutputFormat};
use clap::{ArgAction, Args};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use trakt_export_core::{CsvOptions, ExportError, ExportJob, ExportOptions, ExportSummary};
use trakt_export_models::{CleanupTally, IdFormat, ItemKind, ListKind, RequestContext, SortOrder};
use trakt_export_source::{ListSource, TraktError};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Which list to export
    #[arg(short, long, default_value = "history", value_parser = ["watchlist", "collection", "history"])]
    list: String,

    /// Which type to export
    #[arg(short = 't', long = "type", default_value = "movies", value_parser = ["movies", "shows", "episodes"])]
    item_type: String,

    /// Which id format to export (episodes always use tmdb)
    #[arg(short, long, default_value = "imdb", value_parser = ["imdb", "tmdb", "tvdb", "tvrage", "trakt"])]
    format: String,

    /// Sort rows by timestamp
    #[arg(short, long, default_value = "desc", value_parser = ["asc", "desc"])]
    sort: String,

    /// Output file (default: export_{type}_{list}.csv)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// CSV delimiter
    #[arg(long, default_value = ",")]
    delimiter: String,

    /// Empty the list after the export
    #[arg(short = 'C', long, action = ArgAction::SetTrue)]
    clean: bool,

    /// Remove duplicated entries from the list after the export
    #[arg(short = 'D', long, action = ArgAction::SetTrue)]
    duplicate: bool,

    /// Export a named list of this user instead of --list
    #[arg(short, long, value_name = "USER")]
    userlist: Option<String>,

    /// Id of the user's list (prompted for when omitted)
    #[arg(long, value_name = "ID", requires = "userlist")]
    listid: Option<String>,
}

pub async fn run_export(args: ExportArgs, config: Option<PathBuf>, output: &Output) -> Result<()> {
    tracing::debug!(?args, "Export command started");

    let list: ListKind = args.list.parse()?;
    let kind: ItemKind = args.item_type.parse()?;
    let format: IdFormat = args.format.parse()?;
    let sort: SortOrder = args.sort.parse()?;
    let csv = CsvOptions::new(&args.delimiter, sort)?;

    // Reject episodes from collection before touching the network
    if args.userlist.is_none() {
        RequestContext::new(list, kind, format)?;
    }

    if matches!(format, IdFormat::Tvrage | IdFormat::Trakt) && kind != ItemKind::Episodes {
        output.warn(format!(
            "No row can be built from {} ids, the export will be empty",
            format
        ));
    }

    let client = connect(config, output).await?;

    let ctx = match &args.userlist {
        Some(user) => {
            let list_id = match args.listid.clone() {
                Some(id) => id,
                None => prompt_list_id(&client, user, output).await?,
            };
            RequestContext::user_list(user.clone(), list_id, kind, format)?
        }
        None => RequestContext::new(list, kind, format)?,
    };

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(ctx.default_output_name()));

    let options = ExportOptions {
        output: output_path,
        csv,
        clean: args.clean,
        remove_duplicates: args.duplicate,
    };

    let spinner = Spinner::start(
        format!("Exporting {} {}...", ctx.list_label(), ctx.item_kind()),
        output.is_human() && !output.is_quiet(),
    );
    let job = ExportJob::new(&client, ctx, options);
    let summary = match job.run().await {
        Ok(summary) => {
            spinner.finish("Done");
            summary
        }
        Err(e) => {
            spinner.abandon();
            if let Some(hint) = failure_hint(&e) {
                output.warn(hint);
            }
            return Err(e.into());
        }
    };

    print_summary(&summary, output);
    Ok(())
}

async fn prompt_list_id(client: &dyn ListSource, user: &str, output: &Output) -> Result<String> {
    let lists = client.fetch_userlists(user).await?;
    if lists.is_empty() {
        return Err(eyre!("User {} has no named lists", user));
    }
    print_lists(user, &lists, output);

    let default = lists.first().and_then(|l| l.list_id());
    let id = prompt_string("Enter the list id to export", default.as_deref())?;
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(eyre!("A list id is required"));
    }
    Ok(id)
}

/// What the user can do about a failed export
fn failure_hint(err: &ExportError) -> Option<&'static str> {
    match err {
        ExportError::Source(e) if e.is_fatal() => {
            Some("Check client_id, client_secret and the tokens in the configuration file")
        }
        ExportError::Source(TraktError::Fetch { .. } | TraktError::Request(_)) => {
            Some("Trakt.tv did not answer the request, running the export again may succeed")
        }
        _ => None,
    }
}

fn tally_line(label: &str, tally: &CleanupTally, kind: ItemKind) -> String {
    format!(
        "{} {} {}, results deleted:{}, not_found:{} ({} batches)",
        label, tally.sent, kind, tally.deleted, tally.not_found, tally.batches
    )
}

fn print_summary(summary: &ExportSummary, output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            output.success(format!(
                "Exported {} of {} {} from {} to {}",
                summary.rows_written,
                summary.fetched,
                summary.item_kind,
                summary.list,
                summary.output.display().bold()
            ));
            output.info(format!(
                "Found {} duplicate out of {} {}",
                summary.duplicates.len(),
                summary.rows_written,
                summary.item_kind
            ));
            if let Some(tally) = &summary.cleanup {
                output.info(tally_line("Overall cleanup", tally, summary.item_kind));
            }
            if let Some(tally) = &summary.duplicate_cleanup {
                let label = format!("Overall {} duplicate", summary.duplicates.len());
                output.info(tally_line(&label, tally, summary.item_kind));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let data = serde_json::to_value(summary).unwrap_or_else(|e| json!({ "error": e.to_string() }));
            output.json(&json!({ "success": true, "summary": data }));
        }
    }
}
