// =============================================================================
// Stochastic Oscillator
// =============================================================================
//
//   raw %K = 100 * (close - lowest_low(window)) / (highest_high(window) - lowest_low(window))
//   %K     = SMA(raw %K, smooth)
//   %D     = SMA(%K, smooth)
//
// A flat market (highest high == lowest low) has no defined position inside
// its range: that raw %K point is undefined, and so is every %K / %D window
// that includes it.  Nothing is divided by zero.
//
// %K is not clamped.  Bars whose close lies within [low, high] always give a
// value in [0, 100]; a close outside its bar's range shows up as a reading
// outside that band instead of being hidden at the edge.
// =============================================================================

use serde::Serialize;

use crate::indicators::rolling::{rolling_max, rolling_mean, rolling_min};
use crate::types::Series;

pub const DEFAULT_WINDOW: usize = 14;
pub const DEFAULT_SMOOTH: usize = 3;

/// Smoothed %K and %D lines, aligned to the input closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StochasticOutput {
    pub k_line: Series,
    pub d_line: Series,
}

/// Unsmoothed %K; undefined where the rolling range is zero.
pub fn raw_k(highs: &Series, lows: &Series, closes: &Series, window: usize) -> Series {
    let highest = rolling_max(highs.values(), window);
    let lowest = rolling_min(lows.values(), window);

    let values = closes
        .values()
        .iter()
        .zip(highest.iter().zip(lowest.iter()))
        .map(|(close, (hh, ll))| match (close, hh, ll) {
            (Some(c), Some(hh), Some(ll)) => {
                let range = hh - ll;
                if range > 0.0 {
                    Some(100.0 * (c - ll) / range)
                } else {
                    None
                }
            }
            _ => None,
        })
        .collect();

    closes.with_values(values)
}

/// Calculate the smoothed stochastic oscillator.
pub fn stochastic(
    highs: &Series,
    lows: &Series,
    closes: &Series,
    window: usize,
    smooth: usize,
) -> StochasticOutput {
    let raw = raw_k(highs, lows, closes, window);
    let k_line = raw.with_values(rolling_mean(raw.values(), smooth));
    let d_line = k_line.with_values(rolling_mean(k_line.values(), smooth));
    StochasticOutput { k_line, d_line }
}
