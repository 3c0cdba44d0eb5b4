// =============================================================================
// MACD (Moving Average Convergence Divergence)
// =============================================================================
//
//   macd_line   = EMA(close, fast) - EMA(close, slow)
//   signal_line = EMA(macd_line, signal)
//   histogram   = macd_line - signal_line
//
// Standard configuration is (12, 26, 9).  The MACD line is defined from index
// `slow - 1`, the signal line and histogram from `slow + signal - 2`.
// =============================================================================

use serde::Serialize;

use crate::indicators::ema::ema;
use crate::types::Series;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Full MACD output, aligned to the input closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdOutput {
    pub macd_line: Series,
    pub signal_line: Series,
    pub histogram: Series,
}

/// Calculate MACD line, signal line and histogram.
pub fn macd(closes: &Series, fast: usize, slow: usize, signal: usize) -> MacdOutput {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let macd_line = fast_ema.zip_with(&slow_ema, |f, s| f - s);
    let signal_line = ema(&macd_line, signal);
    let histogram = macd_line.zip_with(&signal_line, |m, s| m - s);

    MacdOutput {
        macd_line,
        signal_line,
        histogram,
    }
}

/// MACD with the standard (12, 26, 9) configuration.
pub fn macd_standard(closes: &Series) -> MacdOutput {
    macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::price_series::test_support::series_from_closes;

    fn wave(n: usize) -> Series {
        let closes: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0 + i as f64 * 0.1)
            .collect();
        series_from_closes(&closes).closes()
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        let out = macd_standard(&wave(120));
        let mut checked = 0;
        for i in 0..120 {
            if let (Some(m), Some(s), Some(h)) = (
                out.macd_line.get(i),
                out.signal_line.get(i),
                out.histogram.get(i),
            ) {
                assert!((h - (m - s)).abs() < 1e-9);
                checked += 1;
            }
        }
        assert_eq!(checked, 120 - 33);
    }

    #[test]
    fn warmup_lengths_follow_windows() {
        let out = macd_standard(&wave(60));
        assert_eq!(out.macd_line.leading_undefined(), 25);
        assert_eq!(out.signal_line.leading_undefined(), 33);
        assert_eq!(out.histogram.leading_undefined(), 33);
        assert_eq!(out.histogram.len(), 60);
    }

    #[test]
    fn short_series_is_all_undefined_but_aligned() {
        let out = macd_standard(&wave(20));
        assert_eq!(out.macd_line.len(), 20);
        assert_eq!(out.macd_line.defined_count(), 0);
        assert_eq!(out.histogram.defined_count(), 0);
    }

    #[test]
    fn flat_series_has_zero_macd() {
        let closes = series_from_closes(&[50.0; 60]).closes();
        let out = macd_standard(&closes);
        let last = out.histogram.last().unwrap();
        assert!(last.abs() < 1e-9);
        assert!(out.macd_line.last().unwrap().abs() < 1e-9);
    }
}
