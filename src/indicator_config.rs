// =============================================================================
// Indicator Configuration — the parameters chosen on the control surface
// =============================================================================
//
// Every field carries `#[serde(default)]` so a control surface may send only
// the fields it changed.  Validation is explicit and runs before any
// computation: out-of-range windows are rejected, never clamped, so the same
// request always produces the same chart.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::indicators::{macd, stochastic};

/// Smallest moving-average window accepted from the control surface.
pub const MIN_WINDOW: usize = 10;
/// Largest moving-average window accepted from the control surface.
pub const MAX_WINDOW: usize = 200;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_sma1_window() -> usize {
    100
}

fn default_sma2_window() -> usize {
    50
}

fn default_sma2_kind() -> MovingAverageKind {
    MovingAverageKind::Exponential
}

// =============================================================================
// Enums
// =============================================================================

/// Which moving average the Bollinger bands are centred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BollingerBasis {
    #[serde(rename = "SMA1")]
    Sma1,
    #[serde(rename = "SMA2")]
    Sma2,
    #[default]
    #[serde(rename = "none")]
    None,
}

impl std::fmt::Display for BollingerBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sma1 => write!(f, "SMA1"),
            Self::Sma2 => write!(f, "SMA2"),
            Self::None => write!(f, "none"),
        }
    }
}

/// How a moving-average slot is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovingAverageKind {
    #[default]
    Simple,
    Exponential,
}

// =============================================================================
// IndicatorConfig
// =============================================================================

/// Toggles and windows for the price-panel overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default)]
    pub sma1_enabled: bool,

    #[serde(default = "default_sma1_window")]
    pub sma1_window: usize,

    /// Moving average used for the first slot.
    #[serde(default)]
    pub sma1_kind: MovingAverageKind,

    #[serde(default)]
    pub sma2_enabled: bool,

    #[serde(default = "default_sma2_window")]
    pub sma2_window: usize,

    /// Moving average used for the second slot. Exponential by default.
    #[serde(default = "default_sma2_kind")]
    pub sma2_kind: MovingAverageKind,

    #[serde(default)]
    pub bollinger_enabled: bool,

    #[serde(default)]
    pub bollinger_basis: BollingerBasis,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma1_enabled: false,
            sma1_window: default_sma1_window(),
            sma1_kind: MovingAverageKind::Simple,
            sma2_enabled: false,
            sma2_window: default_sma2_window(),
            sma2_kind: default_sma2_kind(),
            bollinger_enabled: false,
            bollinger_basis: BollingerBasis::None,
        }
    }
}

impl IndicatorConfig {
    /// Check windows and the band basis before anything is computed.
    ///
    /// Both windows are checked even when their line is disabled; the
    /// basis is only checked when bands are enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_window("sma1", self.sma1_window)?;
        check_window("sma2", self.sma2_window)?;

        if self.bollinger_enabled {
            match self.bollinger_basis {
                BollingerBasis::Sma1 if !self.sma1_enabled => {
                    return Err(ConfigError::BasisNotEnabled { basis: "SMA1" });
                }
                BollingerBasis::Sma2 if !self.sma2_enabled => {
                    return Err(ConfigError::BasisNotEnabled { basis: "SMA2" });
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Bases a control surface may offer: only enabled moving averages.
    pub fn basis_options(&self) -> Vec<BollingerBasis> {
        let mut options = Vec::with_capacity(2);
        if self.sma1_enabled {
            options.push(BollingerBasis::Sma1);
        }
        if self.sma2_enabled {
            options.push(BollingerBasis::Sma2);
        }
        options
    }

    /// Bands are drawn only when toggled on and centred on a moving average.
    pub fn bands_visible(&self) -> bool {
        self.bollinger_enabled && self.bollinger_basis != BollingerBasis::None
    }

    /// Window shared by the band basis and its standard deviation: the SMA2
    /// window when the basis is SMA2, the SMA1 window otherwise.
    pub fn bollinger_window(&self) -> usize {
        match self.bollinger_basis {
            BollingerBasis::Sma2 => self.sma2_window,
            BollingerBasis::Sma1 | BollingerBasis::None => self.sma1_window,
        }
    }
}

fn check_window(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if (MIN_WINDOW..=MAX_WINDOW).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::WindowOutOfRange {
            name,
            value,
            min: MIN_WINDOW,
            max: MAX_WINDOW,
        })
    }
}

// =============================================================================
// OscillatorParams
// =============================================================================

fn default_macd_fast() -> usize {
    macd::DEFAULT_FAST
}

fn default_macd_slow() -> usize {
    macd::DEFAULT_SLOW
}

fn default_macd_signal() -> usize {
    macd::DEFAULT_SIGNAL
}

fn default_stoch_window() -> usize {
    stochastic::DEFAULT_WINDOW
}

fn default_stoch_smooth() -> usize {
    stochastic::DEFAULT_SMOOTH
}

/// Fixed parameters of the lower panels. Not exposed on the control surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OscillatorParams {
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    #[serde(default = "default_stoch_window")]
    pub stoch_window: usize,

    #[serde(default = "default_stoch_smooth")]
    pub stoch_smooth: usize,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            stoch_window: default_stoch_window(),
            stoch_smooth: default_stoch_smooth(),
        }
    }
}

impl OscillatorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.macd_fast == 0 || self.macd_slow == 0 || self.macd_signal == 0 {
            return Err(ConfigError::InvalidOscillatorParams {
                indicator: "macd",
                reason: "windows must be at least 1".to_string(),
            });
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::InvalidOscillatorParams {
                indicator: "macd",
                reason: format!(
                    "fast window {} must be shorter than slow window {}",
                    self.macd_fast, self.macd_slow
                ),
            });
        }
        if self.stoch_window == 0 || self.stoch_smooth == 0 {
            return Err(ConfigError::InvalidOscillatorParams {
                indicator: "stochastic",
                reason: "windows must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
