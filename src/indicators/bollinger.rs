// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a basis line, an upper band (basis + k*σ) and a
// lower band (basis - k*σ), where σ is the rolling *population* standard
// deviation of the closes (divisor = window).
//
// The basis is supplied by the caller (whichever moving average the chart
// designates as band center); σ is recomputed over the same window so basis
// and spread stay aligned.

use serde::Serialize;

use crate::indicators::rolling::rolling_std_population;
use crate::types::Series;

/// Band multiplier applied to the rolling standard deviation.
pub const NUM_STD: f64 = 2.0;

/// Upper and lower bands around a caller-supplied basis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: Series,
    pub lower: Series,
}

/// Calculate bands of `NUM_STD` standard deviations around `basis`.
///
/// A band point is undefined wherever the basis or the rolling deviation is
/// undefined.
pub fn bollinger_bands(closes: &Series, basis: &Series, window: usize) -> BollingerBands {
    bollinger_bands_with(closes, basis, window, NUM_STD)
}

/// Same as [`bollinger_bands`] with an explicit multiplier.
pub fn bollinger_bands_with(
    closes: &Series,
    basis: &Series,
    window: usize,
    num_std: f64,
) -> BollingerBands {
    let std_dev = closes.with_values(rolling_std_population(closes.values(), window));

    BollingerBands {
        upper: basis.zip_with(&std_dev, |b, sd| b + num_std * sd),
        lower: basis.zip_with(&std_dev, |b, sd| b - num_std * sd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::ema::ema;
    use crate::indicators::sma::sma;
    use crate::market_data::price_series::test_support::{ramp_30, series_from_closes};

    #[test]
    fn flat_series_bands_collapse_onto_basis() {
        let closes = series_from_closes(&[100.0; 30]).closes();
        let basis = ema(&closes, 20);
        let bands = bollinger_bands(&closes, &basis, 20);
        assert_eq!(bands.upper, basis);
        assert_eq!(bands.lower, basis);
    }

    #[test]
    fn bands_straddle_basis_symmetrically() {
        let closes = ramp_30().closes();
        let basis = sma(&closes, 10);
        let bands = bollinger_bands(&closes, &basis, 10);

        // Population std of ten consecutive integers = sqrt(8.25).
        let spread = 2.0 * 8.25_f64.sqrt();
        let upper = bands.upper.get(29).unwrap();
        let lower = bands.lower.get(29).unwrap();
        assert!((upper - (124.5 + spread)).abs() < 1e-9);
        assert!((lower - (124.5 - spread)).abs() < 1e-9);
    }

    #[test]
    fn bands_are_undefined_until_basis_and_std_exist() {
        let closes = ramp_30().closes();
        // EMA basis and std share the window, so both start at index 9.
        let bands = bollinger_bands(&closes, &ema(&closes, 10), 10);
        assert_eq!(bands.upper.leading_undefined(), 9);
        assert_eq!(bands.lower.leading_undefined(), 9);
        assert_eq!(bands.upper.len(), 30);
    }

    #[test]
    fn custom_multiplier_scales_spread() {
        let closes = ramp_30().closes();
        let basis = sma(&closes, 10);
        let one = bollinger_bands_with(&closes, &basis, 10, 1.0);
        let two = bollinger_bands(&closes, &basis, 10);
        let w1 = one.upper.get(20).unwrap() - one.lower.get(20).unwrap();
        let w2 = two.upper.get(20).unwrap() - two.lower.get(20).unwrap();
        assert!((w2 - 2.0 * w1).abs() < 1e-9);
    }
}
