//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Recur - Find recurring payments and predict the next charge
#[derive(Parser)]
#[command(name = "recur")]
#[command(about = "Recurring payment detector and forecaster", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Tolerance config file
    ///
    /// Defaults to ~/.local/share/recur/config/recurrence.toml when present,
    /// otherwise the built-in defaults (±20% time, ±20% amount).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect recurring payments and forecast their next occurrence
    Detect {
        #[command(flatten)]
        input: InputArgs,

        /// Time tolerance around the dominant interval (e.g. 0.2 = ±20%)
        #[arg(long)]
        time_delta: Option<f64>,

        /// Amount tolerance around the earlier charge (e.g. 0.2 = ±20%)
        #[arg(long)]
        amount_delta: Option<f64>,

        /// Output format: table, json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Analyze merchant groups in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// List merchant groups with their dominant interval
    Groups {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the effective tolerance configuration
    Config,
}

/// Transaction file options shared by commands that read input
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Transaction file (JSON array or CSV with a header row)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Input format: json, csv (detected from the extension if not specified)
    #[arg(long)]
    pub format: Option<String>,

    /// Use absolute amounts (for exports where charges are negative)
    #[arg(long)]
    pub abs_amounts: bool,
}
