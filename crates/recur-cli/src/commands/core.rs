//! Shared command utilities (config resolution, input loading)

use std::path::Path;

use anyhow::{Context, Result};
use recur_core::{
    load_config, load_transactions, ImportOptions, InputFormat, RecurrenceConfig, Transaction,
};
use tracing::debug;

use crate::cli::InputArgs;

/// Load the layered config and apply any flag overrides on top
pub fn resolve_config(
    config_path: Option<&Path>,
    time_delta: Option<f64>,
    amount_delta: Option<f64>,
) -> Result<RecurrenceConfig> {
    let (mut config, source) = load_config(config_path)?;
    debug!("Using tolerance config from {}", source);

    if let Some(value) = time_delta {
        config = config
            .with_time_delta(value)
            .context("Invalid --time-delta")?;
    }
    if let Some(value) = amount_delta {
        config = config
            .with_amount_delta(value)
            .context("Invalid --amount-delta")?;
    }

    Ok(config)
}

/// Read the transaction file named by the input flags
pub fn load_input(input: &InputArgs) -> Result<Vec<Transaction>> {
    if !input.file.exists() {
        anyhow::bail!("File not found: {}", input.file.display());
    }

    let format = input
        .format
        .as_deref()
        .map(str::parse::<InputFormat>)
        .transpose()?;
    let options = ImportOptions {
        absolute_amounts: input.abs_amounts,
    };

    load_transactions(&input.file, format, options)
        .with_context(|| format!("Failed to import {}", input.file.display()))
}
