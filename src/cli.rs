use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scriptkeeper")]
#[command(about = "Save scripts and keep a history of every update")]
#[command(version)]
pub struct Cli {
    /// Store root directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to ~/.config/scriptkeeper/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Save content to a file in the store and record a history entry
    Save(SaveArgs),

    /// List recorded saves, newest first
    History(HistoryArgs),

    /// Delete the whole history log
    ClearHistory,

    /// Show the number of updates and the last one
    Stats(StatsArgs),

    /// List script files in the store root
    Ls,

    /// Print a script from the store
    Show(ShowArgs),

    /// Create a new script from the template
    New(NewArgs),
}

#[derive(Parser)]
pub struct SaveArgs {
    /// File name to save as (directory components are dropped)
    pub name: String,

    /// Update message recorded with the save
    #[arg(long, short = 'm', default_value = "")]
    pub message: String,

    /// Read content from this file instead of stdin
    #[arg(long)]
    pub from: Option<PathBuf>,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// List in log order instead of newest first
    #[arg(long, default_value_t = false)]
    pub oldest_first: bool,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Script name (defaults to the configured default file)
    pub name: Option<String>,
}

#[derive(Parser)]
pub struct NewArgs {
    /// Name of the script to create
    pub name: String,
}
