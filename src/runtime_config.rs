// =============================================================================
// Runtime Configuration — analysis settings with atomic save
// =============================================================================
//
// Every tunable parameter of the analysis pipeline lives here. Persistence
// uses an atomic tmp + rename pattern to prevent corruption on crash. All
// fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older config file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::Period;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_ma_short_window() -> usize {
    50
}

fn default_ma_long_window() -> usize {
    200
}

fn default_rsi_period() -> usize {
    14
}

fn default_bollinger_window() -> usize {
    20
}

fn default_bollinger_k() -> f64 {
    2.0
}

fn default_max_compare_tickers() -> usize {
    10
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Window sizes and band width for the indicator engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// Short moving-average window (the 50-day line on the chart).
    #[serde(default = "default_ma_short_window")]
    pub ma_short_window: usize,

    /// Long moving-average window (the 200-day line).
    #[serde(default = "default_ma_long_window")]
    pub ma_long_window: usize,

    /// RSI look-back in trading days.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Bollinger band window.
    #[serde(default = "default_bollinger_window")]
    pub bollinger_window: usize,

    /// Bollinger band width in standard deviations.
    #[serde(default = "default_bollinger_k")]
    pub bollinger_k: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_short_window: default_ma_short_window(),
            ma_long_window: default_ma_long_window(),
            rsi_period: default_rsi_period(),
            bollinger_window: default_bollinger_window(),
            bollinger_k: default_bollinger_k(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the MarketLens service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Lookback used when a request omits `period`.
    #[serde(default)]
    pub default_period: Period,

    /// Upper bound on tickers per comparison request.
    #[serde(default = "default_max_compare_tickers")]
    pub max_compare_tickers: usize,

    /// Indicator engine parameters.
    #[serde(default)]
    pub indicator_params: IndicatorParams,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_period: Period::default(),
            max_compare_tickers: default_max_compare_tickers(),
            indicator_params: IndicatorParams::default(),
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
            default_period = %config.default_period,
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
}
