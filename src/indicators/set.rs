// =============================================================================
// Indicator Set — every series the chart needs, computed in one pass
// =============================================================================
//
// Each indicator is a pure function of the immutable price series, so the
// order of computation does not matter and nothing computed here can leak
// into the next request.  The only fallible step is validation, which runs
// before anything is computed.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::indicator_config::{IndicatorConfig, MovingAverageKind, OscillatorParams};
use crate::indicators::bollinger::{bollinger_bands, BollingerBands};
use crate::indicators::ema::ema;
use crate::indicators::macd::{macd, MacdOutput};
use crate::indicators::sma::sma;
use crate::indicators::stochastic::{stochastic, StochasticOutput};
use crate::market_data::PriceSeries;
use crate::types::Series;

/// All derived series for one `IndicatorConfig`, aligned to the price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    /// The selection these series were computed for.
    pub config: IndicatorConfig,
    pub dates: Vec<NaiveDate>,
    pub sma1: Series,
    pub sma2: Series,
    /// Present only when bands are visible for the config.
    pub bands: Option<BollingerBands>,
    pub macd: MacdOutput,
    pub stochastic: StochasticOutput,
}

fn moving_average(closes: &Series, window: usize, kind: MovingAverageKind) -> Series {
    match kind {
        MovingAverageKind::Simple => sma(closes, window),
        MovingAverageKind::Exponential => ema(closes, window),
    }
}

/// Validate `config` and `params`, then derive every indicator series.
pub fn compute_indicators(
    prices: &PriceSeries,
    config: &IndicatorConfig,
    params: &OscillatorParams,
) -> Result<IndicatorSet, ConfigError> {
    config.validate()?;
    params.validate()?;

    let closes = prices.closes();

    let sma1 = moving_average(&closes, config.sma1_window, config.sma1_kind);
    let sma2 = moving_average(&closes, config.sma2_window, config.sma2_kind);

    // The band centre is always an EMA over the selected slot's window,
    // whatever kind that slot draws.
    let bands = config.bands_visible().then(|| {
        let window = config.bollinger_window();
        let basis = ema(&closes, window);
        bollinger_bands(&closes, &basis, window)
    });

    let macd = macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
    let stochastic = stochastic(
        &prices.highs(),
        &prices.lows(),
        &closes,
        params.stoch_window,
        params.stoch_smooth,
    );

    debug!(
        bars = prices.len(),
        sma1_window = config.sma1_window,
        sma2_window = config.sma2_window,
        bands = bands.is_some(),
        "indicators computed"
    );

    Ok(IndicatorSet {
        config: config.clone(),
        dates: prices.dates().to_vec(),
        sma1,
        sma2,
        bands,
        macd,
        stochastic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator_config::BollingerBasis;
    use crate::market_data::price_series::test_support::{ramp_30, series_from_closes};

    fn bands_on(basis: BollingerBasis) -> IndicatorConfig {
        IndicatorConfig {
            sma1_enabled: true,
            sma1_window: 10,
            sma2_enabled: true,
            sma2_window: 20,
            bollinger_enabled: true,
            bollinger_basis: basis,
            ..IndicatorConfig::default()
        }
    }

    #[test]
    fn every_series_is_aligned_with_prices() {
        let prices = ramp_30();
        let set = compute_indicators(
            &prices,
            &bands_on(BollingerBasis::Sma1),
            &OscillatorParams::default(),
        )
        .unwrap();

        let closes = prices.closes();
        let bands = set.bands.as_ref().unwrap();
        for series in [
            &set.sma1,
            &set.sma2,
            &bands.upper,
            &bands.lower,
            &set.macd.macd_line,
            &set.macd.signal_line,
            &set.macd.histogram,
            &set.stochastic.k_line,
            &set.stochastic.d_line,
        ] {
            assert_eq!(series.len(), prices.len());
            assert!(series.is_aligned_with(&closes));
        }
        assert_eq!(set.dates, prices.dates());
    }

    #[test]
    fn ramp_scenario_end_to_end() {
        let config = IndicatorConfig {
            sma1_enabled: true,
            sma1_window: 10,
            ..IndicatorConfig::default()
        };
        let set = compute_indicators(&ramp_30(), &config, &OscillatorParams::default()).unwrap();
        assert_eq!(set.sma1.get(29), Some(124.5));
        assert_eq!(set.sma1.leading_undefined(), 9);
    }

    #[test]
    fn sma2_uses_exponential_average_by_default() {
        let prices = ramp_30();
        let config = IndicatorConfig {
            sma2_enabled: true,
            sma2_window: 10,
            ..IndicatorConfig::default()
        };
        let set = compute_indicators(&prices, &config, &OscillatorParams::default()).unwrap();
        assert_eq!(set.sma2, ema(&prices.closes(), 10));
    }

    #[test]
    fn band_basis_is_ema_over_selected_window() {
        let prices = series_from_closes(&[100.0; 40]);
        let set = compute_indicators(
            &prices,
            &bands_on(BollingerBasis::Sma2),
            &OscillatorParams::default(),
        )
        .unwrap();
        let bands = set.bands.unwrap();
        let basis = ema(&prices.closes(), 20);
        assert_eq!(bands.upper, basis);
        assert_eq!(bands.lower, basis);
        assert_eq!(bands.upper.leading_undefined(), 19);
    }

    #[test]
    fn bands_absent_without_basis() {
        let config = IndicatorConfig {
            bollinger_enabled: true,
            ..IndicatorConfig::default()
        };
        let set = compute_indicators(&ramp_30(), &config, &OscillatorParams::default()).unwrap();
        assert!(set.bands.is_none());
    }

    #[test]
    fn invalid_window_fails_before_computing() {
        let config = IndicatorConfig {
            sma1_window: 500,
            ..IndicatorConfig::default()
        };
        let err = compute_indicators(&ramp_30(), &config, &OscillatorParams::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::WindowOutOfRange { value: 500, .. }));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let prices = ramp_30();
        let config = bands_on(BollingerBasis::Sma1);
        let params = OscillatorParams::default();
        let a = compute_indicators(&prices, &config, &params).unwrap();
        let b = compute_indicators(&prices, &config, &params).unwrap();
        assert_eq!(a, b);
    }
}
