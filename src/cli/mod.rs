//! CLI entry point for actionview.

pub mod replay;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// actionview CLI
#[derive(Parser, Debug)]
#[command(name = "actionview", version, about = "Replay agent tool calls through action renderers")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSONL file of tool-call events and print every render frame
    Replay(ReplayArgs),
    /// Print the tool declarations of a manifest as JSON
    Schema(SchemaArgs),
}

/// Arguments for `actionview replay`.
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// TOML manifest declaring the actions
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Only render final fragments
    #[arg(long)]
    pub final_only: bool,

    /// JSONL file with one tool-call event per line
    pub events: PathBuf,
}

/// Arguments for `actionview schema`.
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// TOML manifest declaring the actions
    pub manifest: PathBuf,
}
