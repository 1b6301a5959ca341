use clap::{ArgAction, Parser, Subcommand};
use commands::{config, export, lists};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "trakt-export")]
#[command(about = "Export movies, shows or episodes IDs from a Trakt.tv list to CSV")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output_format: output::OutputFormat,

    /// Configuration file (default: <config dir>/trakt-export/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write logs to a daily rotated file (default location when no path is given)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a list to CSV, optionally cleaning it afterwards
    #[command(long_about = "Fetch every page of a Trakt.tv list, write one CSV row per entry that has an id in the chosen format, and optionally remove the exported entries (--clean) or duplicated entries (--duplicate) from the list.")]
    Export(export::ExportArgs),

    /// Show the named lists of a user
    Lists {
        /// Trakt.tv user handle
        user: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },

    /// Show current configuration (masks secrets)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli.log_file.map(|path| {
        if path.as_os_str().is_empty() {
            trakt_export_config::PathManager::default().log_file()
        } else {
            path
        }
    });
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output_format, cli.quiet);

    match cli.command {
        Commands::Export(args) => export::run_export(args, cli.config, &output).await,
        Commands::Lists { user } => lists::run_lists(&user, cli.config, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, cli.config, &output),
    }
}
