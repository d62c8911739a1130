//! Tolerance configuration for recurrence detection
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path (e.g. `recur --config path.toml`), if the file exists
//! 2. Override in data dir (~/.local/share/recur/config/recurrence.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/recurrence.toml");

/// Tolerances applied when comparing two transactions of the same group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceConfig {
    /// Allowed deviation of a day gap from the dominant interval (0.20 = ±20%)
    pub time_delta: Decimal,
    /// Allowed deviation of an amount from the earlier amount (0.20 = ±20%)
    pub amount_delta: Decimal,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            time_delta: dec!(0.20),
            amount_delta: dec!(0.20),
        }
    }
}

impl RecurrenceConfig {
    /// Create a validated configuration
    pub fn new(time_delta: Decimal, amount_delta: Decimal) -> Result<Self> {
        let config = Self {
            time_delta,
            amount_delta,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the time tolerance with a float value (e.g. from a CLI flag)
    pub fn with_time_delta(self, value: f64) -> Result<Self> {
        Self::new(decimal_from_f64("time_delta", value)?, self.amount_delta)
    }

    /// Replace the amount tolerance with a float value (e.g. from a CLI flag)
    pub fn with_amount_delta(self, value: f64) -> Result<Self> {
        Self::new(self.time_delta, decimal_from_f64("amount_delta", value)?)
    }

    /// Both deltas must lie in [0, 1)
    pub fn validate(&self) -> Result<()> {
        check_delta("time_delta", self.time_delta)?;
        check_delta("amount_delta", self.amount_delta)
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => f.write_str("embedded defaults"),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("recur").join("config").join("recurrence.toml"))
}

/// Load configuration (explicit path first, then data dir override, then default)
pub fn load_config(override_path: Option<&Path>) -> Result<(RecurrenceConfig, ConfigSource)> {
    if let Some(path) = override_path {
        if path.exists() {
            return load_file(path);
        }
        warn!(
            "Config file {} not found, falling back to defaults",
            path.display()
        );
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            return load_file(&default_path);
        }
    }

    debug!("Using embedded tolerance config");
    Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
}

fn load_file(path: &Path) -> Result<(RecurrenceConfig, ConfigSource)> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config = parse_config(&content)?;
    debug!("Loaded tolerance config from {}", path.display());
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    tolerance: Option<RawTolerance>,
}

#[derive(Debug, Deserialize)]
struct RawTolerance {
    time_delta: Option<f64>,
    amount_delta: Option<f64>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<RecurrenceConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = RecurrenceConfig::default();

    if let Some(tolerance) = raw.tolerance {
        if let Some(value) = tolerance.time_delta {
            config.time_delta = decimal_from_f64("time_delta", value)?;
        }
        if let Some(value) = tolerance.amount_delta {
            config.amount_delta = decimal_from_f64("amount_delta", value)?;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Convert through the shortest decimal representation so 0.2 stays exactly 0.2
fn decimal_from_f64(name: &str, value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(Error::Config(format!("{} must be finite, got {}", name, value)));
    }
    Decimal::from_str(&value.to_string())
        .map_err(|e| Error::Config(format!("Invalid {} {}: {}", name, value, e)))
}

fn check_delta(name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(Error::Config(format!(
            "{} must be in [0, 1), got {}",
            name, value
        )));
    }
    Ok(())
}
