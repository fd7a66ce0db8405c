//! Retain Theme command line
//!
//! Inspect, convert and diff serialized annotated strings, and fetch urls
//! through the request wrapper.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use retain_theme::commands::{
    parse_param, ConvertCommand, DiffCommand, FetchCommand, Form, InspectCommand, ReplayCommand,
};
use retain_theme::core::{AppConfig, SnackbarEngine, SnackbarKind, SnackbarResult, APP_NAME, VERSION};

#[derive(Parser)]
#[command(name = "retain-theme", version, about = "Annotated text tools")]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show text, style ranges and rendered font sizes
    Inspect { file: PathBuf },
    /// Re-serialize in the other form
    Convert {
        file: PathBuf,
        #[arg(long, value_enum)]
        to: Form,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare two annotated strings
    Diff { old: PathBuf, new: PathBuf },
    /// Apply one text snapshot per line, as a text field would
    Replay { file: PathBuf },
    /// GET a url
    Fetch {
        url: String,
        /// Query parameter as key=value, repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    info!("{} v{} starting...", APP_NAME, VERSION);

    let loaded = match &cli.config {
        Some(path) => AppConfig::load_from(path).await,
        None => AppConfig::load().await,
    };
    let config = loaded.map_err(|e| {
        error!("{}", e.user_message());
        e
    })?;
    let snackbar = SnackbarEngine::new();

    let result = match cli.command {
        Command::Inspect { file } => InspectCommand { path: file }.execute(&config).await,
        Command::Convert { file, to, output } => {
            ConvertCommand { path: file, to, output }.execute(&snackbar).await
        }
        Command::Diff { old, new } => DiffCommand { old, new }.execute().await,
        Command::Replay { file } => ReplayCommand { path: file }.execute().await,
        Command::Fetch { url, params } => FetchCommand { url, params }.execute(&config, &snackbar).await,
    };

    present_snackbars(&snackbar);

    let output = result?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// A terminal has no snackbar, so queued messages go to the log
fn present_snackbars(snackbar: &SnackbarEngine) {
    while snackbar
        .show_next(SnackbarKind::Error, |message| {
            error!("{}", message.message);
            SnackbarResult::Dismissed
        })
        .is_some()
    {}

    while snackbar
        .show_next(SnackbarKind::Info, |message| {
            info!("{}", message.message);
            SnackbarResult::Dismissed
        })
        .is_some()
    {}
}
