mod args;
mod browse;
mod render;

use anyhow::{anyhow, Context, Result};
use args::{Cli, Command};
use clap::Parser;
use filebrowse::core::config::BrowserConfig;
use filebrowse::core::telemetry::logging::init_logging;
use filebrowse::services::fs::listing::{list_dir, ListParams};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    let log_file = init_logging(config.log_level(), config.log_dir.as_deref())
        .context("failed to set up logging")?;
    if let Some(path) = log_file {
        info!(path = %path.display(), "logging to file");
    }

    match cli.command {
        Command::List { json, .. } => run_list(&config, json).await,
        Command::Browse { .. } => tokio::task::spawn_blocking(move || browse::run(config)).await?,
    }
}

async fn run_list(config: &BrowserConfig, json: bool) -> Result<()> {
    let path = config.resolve_start_path();
    let entries = list_dir(ListParams {
        path: &path,
        filter: config.filter(),
    })
    .await
    .map_err(|e| anyhow!(e.failure().user_message()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render::table(&entries, false));
    }
    Ok(())
}
