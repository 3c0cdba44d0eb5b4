// =============================================================================
// Aurora Charts — indicator engine and multi-pane chart composer
// =============================================================================
//
// Core:
//   - indicators  pure functions deriving date-aligned series from prices
//   - chart       declarative four-panel ChartSpec built from those series
//
// Adapters around the core:
//   - market_data CSV ingestion into a validated, immutable PriceSeries
//   - api         REST control surface (axum)
// =============================================================================

pub mod api;
pub mod app_state;
pub mod chart;
pub mod error;
pub mod indicator_config;
pub mod indicators;
pub mod market_data;
pub mod runtime_config;
pub mod types;

pub use chart::{build_chart, compose_chart, ChartContext, ChartSpec};
pub use error::{ConfigError, DataError};
pub use indicator_config::{BollingerBasis, IndicatorConfig, MovingAverageKind, OscillatorParams};
pub use indicators::{compute_indicators, IndicatorSet};
pub use market_data::{PriceBar, PriceSeries};
pub use types::Series;
