//! Recur CLI - Recurring payment detector
//!
//! Usage:
//!   recur detect --file tx.json         Detect recurring payments
//!   recur detect --file tx.csv -o json  Print predictions as JSON
//!   recur groups --file tx.json         Inspect merchant groups
//!   recur config                        Show effective tolerances

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Detect {
            input,
            time_delta,
            amount_delta,
            output,
            parallel,
        } => {
            let config =
                commands::resolve_config(cli.config.as_deref(), time_delta, amount_delta)?;
            commands::cmd_detect(&input, config, &output, parallel)
        }
        Commands::Groups { input } => {
            let config = commands::resolve_config(cli.config.as_deref(), None, None)?;
            commands::cmd_groups(&input, config)
        }
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}
