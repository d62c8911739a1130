//! Config command implementation

use std::path::Path;

use anyhow::Result;
use recur_core::config::default_config_path;
use recur_core::load_config;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = load_config(config_path)?;

    println!();
    println!("⚙️  Recurrence Tolerances");
    println!("   ─────────────────────────────");
    println!("   Source:       {}", source);
    println!("   Time delta:   ±{}", config.time_delta);
    println!("   Amount delta: ±{}", config.amount_delta);

    if config_path.is_none() {
        if let Some(path) = default_config_path() {
            println!();
            println!("   💡 Override by creating {}", path.display());
        }
    }

    Ok(())
}
