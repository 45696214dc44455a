//! Report configuration.

use serde::{Deserialize, Serialize};

use crate::types::window::DEFAULT_WINDOW_DAYS;

/// Configuration for the unified traffic report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Trailing window length in days. Default: 365.
    pub window_days: Option<u32>,
    /// Path to the SQLite database holding the KPI tables.
    pub db_path: Option<String>,
}

impl ReportConfig {
    /// Parse a TOML document. Missing fields fall back to defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Returns the effective window length, defaulting to 365 days.
    pub fn effective_window_days(&self) -> u32 {
        self.window_days.unwrap_or(DEFAULT_WINDOW_DAYS)
    }
}
