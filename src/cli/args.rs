use clap::{Parser, Subcommand};
use filebrowse::core::config::BrowserConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "filebrowse", version, about = "Browse directories from the terminal")]
pub struct Cli {
    /// Write logs to a timestamped file in this directory instead of stderr.
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one listing and exit.
    List {
        /// Directory to list (defaults to the home directory).
        path: Option<PathBuf>,
        /// Only show names containing this text (case-insensitive).
        #[arg(short, long)]
        filter: Option<String>,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Navigate interactively, reading commands from stdin.
    Browse {
        path: Option<PathBuf>,
        #[arg(short, long)]
        filter: Option<String>,
    },
}

impl Cli {
    pub fn config(&self) -> BrowserConfig {
        let (path, filter) = match &self.command {
            Command::List { path, filter, .. } | Command::Browse { path, filter } => {
                (path.clone(), filter.clone())
            }
        };
        BrowserConfig {
            start_path: path,
            filter,
            log_dir: self.log_dir.clone(),
            verbose: self.verbose,
        }
    }
}
