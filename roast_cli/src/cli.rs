//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roast", version, about = "Roast telemetry CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Roast log JSONL file (takes precedence over config)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Structured JSON output and JSON log lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a roast profile CSV through a deterministic session
    Replay {
        /// Profile CSV (strict header)
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,
        /// Roast title used for the summary and the saved row
        #[arg(long, default_value = "Replayed roast")]
        title: String,
        /// Session date (YYYY-MM-DD); defaults to today
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
        /// Green bean weight in grams
        #[arg(long, value_name = "GRAMS", default_value_t = 250.0)]
        weight_g: f64,
        /// Append the replayed session to the roast log
        #[arg(long, action = ArgAction::SetTrue)]
        save: bool,
    },
    /// List stored roasts
    List,
    /// Show one stored roast as JSON
    Show {
        /// 0-based id from `list`
        #[arg(long)]
        id: usize,
    },
}
