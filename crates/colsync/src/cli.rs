//! Command-line interface definitions for colsync.

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueEnum};
use column_sync::ElementId;
use logging::LogArgs;

/// Command-line interface for the `colsync` binary.
#[derive(Parser, Debug)]
#[command(
    name = "colsync",
    about = "Sync optional-column visibility across grouped tables in a document snapshot",
    version
)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a snapshot, replay toggles, and print the resulting document.
    Sync(SyncArgs),
    /// Print the escaped table selector for a group.
    Selector(SelectorArgs),
}

/// Arguments for the `sync` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Document snapshot (`.ron` or `.json`).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Optional path to a configuration file (RON).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// User toggles replayed after initialization, e.g. `--toggle 0=false`.
    #[arg(long = "toggle", value_name = "ID=BOOL")]
    pub toggles: Vec<Toggle>,

    /// Output format for the resulting document.
    #[arg(long, value_enum, default_value_t = Format::Ron)]
    pub format: Format,

    /// Also print the log events recorded while syncing.
    #[arg(long)]
    pub events: bool,
}

/// Arguments for the `selector` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SelectorArgs {
    /// Group key, used verbatim.
    #[arg(value_name = "GROUP", allow_hyphen_values = true)]
    pub group: String,

    /// Optional path to a configuration file (RON).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Output formats for documents.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Rusty Object Notation.
    Ron,
    /// JSON.
    Json,
}

/// A replayed user interaction: set control `id` to `selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    /// Control element.
    pub id: ElementId,
    /// New `selected` state.
    pub selected: bool,
}

impl FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ID=BOOL, got '{s}'"))?;
        let id = id
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid element id '{id}': {e}"))?;
        let selected = match value.trim() {
            "1" | "true" | "on" => true,
            "0" | "false" | "off" => false,
            other => return Err(format!("invalid state '{other}' (expected true/false)")),
        };
        Ok(Self {
            id: ElementId::new(id),
            selected,
        })
    }
}
