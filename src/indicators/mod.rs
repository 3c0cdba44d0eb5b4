// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators drawn on the
// chart.  Every function takes immutable input series and returns freshly
// allocated series on the same date axis; undefined points are `None`.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rolling;
pub mod set;
pub mod sma;
pub mod stochastic;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use ema::ema;
pub use macd::{macd, MacdOutput};
pub use set::{compute_indicators, IndicatorSet};
pub use sma::sma;
pub use stochastic::{stochastic, StochasticOutput};
