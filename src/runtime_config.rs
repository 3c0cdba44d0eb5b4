// =============================================================================
// Runtime Configuration — process settings with atomic save
// =============================================================================
//
// Everything the chart service needs at startup: where the price data lives,
// where to listen, how the chart looks, and the indicator selection that was
// active when the process last stopped.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chart::{LayoutSettings, Theme};
use crate::indicator_config::{IndicatorConfig, OscillatorParams};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_data_path() -> String {
    "btc.csv".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_instrument_label() -> String {
    "BTC".to_string()
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// CSV file with `Date,Open,High,Low,Close,Volume` columns.
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Address the REST API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Shown as chart title, candlestick name and price-axis title.
    #[serde(default = "default_instrument_label")]
    pub instrument_label: String,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub layout: LayoutSettings,

    /// MACD and stochastic windows.
    #[serde(default)]
    pub oscillators: OscillatorParams,

    /// Indicator selection served by `GET /api/v1/chart`.
    #[serde(default)]
    pub indicators: IndicatorConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            bind_addr: default_bind_addr(),
            instrument_label: default_instrument_label(),
            theme: Theme::default(),
            layout: LayoutSettings::default(),
            oscillators: OscillatorParams::default(),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            data_path = %config.data_path,
            bind_addr = %config.bind_addr,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }

    /// Apply `AURORA_*` environment overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("AURORA_DATA_PATH") {
            self.data_path = path;
        }
        if let Ok(addr) = std::env::var("AURORA_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Ok(label) = std::env::var("AURORA_LABEL") {
            self.instrument_label = label;
        }
    }
}
