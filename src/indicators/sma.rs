// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
//   SMA_t = (close_{t-window+1} + ... + close_t) / window
//
// Undefined for the first `window - 1` points.
// =============================================================================

use crate::indicators::rolling::rolling_mean;
use crate::types::Series;

/// Arithmetic mean of the trailing `window` values, aligned to `closes`.
pub fn sma(closes: &Series, window: usize) -> Series {
    closes.with_values(rolling_mean(closes.values(), window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::price_series::test_support::{ramp_30, series_from_closes};

    #[test]
    fn constant_series_sma_is_constant_where_defined() {
        let prices = series_from_closes(&[100.0; 40]);
        for window in [10, 20, 40] {
            let out = sma(&prices.closes(), window);
            assert_eq!(out.len(), 40);
            assert_eq!(out.leading_undefined(), window - 1);
            assert!(out.values()[window - 1..].iter().all(|v| *v == Some(100.0)));
        }
    }

    #[test]
    fn ramp_sma_matches_trailing_mean() {
        let out = sma(&ramp_30().closes(), 10);
        // mean(120..=129)
        assert_eq!(out.get(29), Some(124.5));
        // mean(100..=109)
        assert_eq!(out.get(9), Some(104.5));
        assert_eq!(out.get(8), None);
    }

    #[test]
    fn window_beyond_length_is_all_undefined() {
        let out = sma(&ramp_30().closes(), 31);
        assert_eq!(out.len(), 30);
        assert_eq!(out.defined_count(), 0);
    }
}
