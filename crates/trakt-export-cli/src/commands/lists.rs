use super::progress::Spinner;
use super::session::connect;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use serde_json::json;
use std::path::PathBuf;
use trakt_export_models::UserList;
use trakt_export_source::ListSource;

pub async fn run_lists(user: &str, config: Option<PathBuf>, output: &Output) -> Result<()> {
    let client = connect(config, output).await?;

    let spinner = Spinner::start(format!("Fetching lists of {}...", user), output.is_human() && !output.is_quiet());
    let lists = match client.fetch_userlists(user).await {
        Ok(lists) => {
            spinner.finish(format!("{} lists", lists.len()));
            lists
        }
        Err(e) => {
            spinner.abandon();
            return Err(e.into());
        }
    };

    if lists.is_empty() {
        output.warn(format!("User {} has no named lists", user));
        return Ok(());
    }
    print_lists(user, &lists, output);
    Ok(())
}

pub fn print_lists(user: &str, lists: &[UserList], output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Id").add_attribute(Attribute::Bold),
                Cell::new("Name").add_attribute(Attribute::Bold),
                Cell::new("Items").add_attribute(Attribute::Bold),
                Cell::new("Owner").add_attribute(Attribute::Bold),
            ]);
            for list in lists {
                table.add_row(vec![
                    Cell::new(list.list_id().unwrap_or_default()),
                    Cell::new(&list.name),
                    Cell::new(list.item_count),
                    Cell::new(list.owner()),
                ]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("Lists of {}:", user);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let entries: Vec<_> = lists
                .iter()
                .map(|l| {
                    json!({
                        "id": l.list_id(),
                        "name": l.name,
                        "item_count": l.item_count,
                        "owner": l.owner(),
                    })
                })
                .collect();
            output.json(&json!({ "user": user, "lists": entries }));
        }
    }
}
