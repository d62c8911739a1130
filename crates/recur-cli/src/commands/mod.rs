//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config resolution, input loading)
//! - `config` - Effective configuration display
//! - `detect` - Recurring payment detection and forecasting
//! - `groups` - Merchant group inspection

pub mod config;
pub mod core;
pub mod detect;
pub mod groups;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use detect::*;
pub use groups::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
