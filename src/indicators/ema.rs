// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (window + 1)
//   EMA_t      = value_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The first EMA value is seeded with the SMA of the first `window` defined
// values.  Leading undefined values are skipped, which lets the same
// recurrence run over derived series (e.g. the MACD line) whose head is
// undefined.
// =============================================================================

use crate::types::Series;

/// Compute the EMA of `input` over `window`, aligned to `input`.
///
/// # Edge cases
/// - `window == 0` => all undefined
/// - fewer than `window` defined values => all undefined
/// - an undefined or non-finite value after the seed yields undefined at that
///   point and the recurrence re-seeds from the following values.
pub fn ema(input: &Series, window: usize) -> Series {
    input.with_values(ema_values(input.values(), window))
}

pub(crate) fn ema_values(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    let multiplier = 2.0 / (window as f64 + 1.0);
    let mut seed: Vec<f64> = Vec::with_capacity(window);
    let mut prev_ema: Option<f64> = None;

    for (i, value) in values.iter().enumerate() {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            seed.clear();
            prev_ema = None;
            continue;
        };

        match prev_ema {
            Some(prev) => {
                let ema = value * multiplier + prev * (1.0 - multiplier);
                if ema.is_finite() {
                    out[i] = Some(ema);
                    prev_ema = Some(ema);
                } else {
                    prev_ema = None;
                }
            }
            None => {
                seed.push(value);
                if seed.len() == window {
                    let sma = seed.iter().sum::<f64>() / window as f64;
                    out[i] = Some(sma);
                    prev_ema = Some(sma);
                    seed.clear();
                }
            }
        }
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::sma::sma;
    use crate::market_data::price_series::test_support::{ramp_30, series_from_closes};

    #[test]
    fn ema_period_zero() {
        let closes = ramp_30().closes();
        assert_eq!(ema(&closes, 0).defined_count(), 0);
    }

    #[test]
    fn ema_insufficient_data() {
        let closes = series_from_closes(&[1.0, 2.0]).closes();
        let out = ema(&closes, 5);
        assert_eq!(out.len(), 2);
        assert_eq!(out.defined_count(), 0);
    }

    #[test]
    fn ema_seed_is_sma_of_first_window() {
        let closes = series_from_closes(&[2.0, 4.0, 6.0]).closes();
        let out = ema(&closes, 3);
        assert_eq!(out.values(), &[None, None, Some(4.0)]);
    }

    #[test]
    fn ema_known_values() {
        // 5-period EMA of [1..=10]: seed 3.0, multiplier 1/3.
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let out = ema(&series_from_closes(&closes).closes(), 5);
        assert_eq!(out.leading_undefined(), 4);

        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        assert!((out.get(4).unwrap() - expected).abs() < 1e-10);
        for (i, &c) in closes.iter().enumerate().skip(5) {
            expected = c * mult + expected * (1.0 - mult);
            let got = out.get(i).unwrap();
            assert!((got - expected).abs() < 1e-10, "got {got}, expected {expected}");
        }
    }

    #[test]
    fn ema_skips_leading_gaps() {
        let closes = ramp_30().closes();
        let shifted: Vec<Option<f64>> = closes
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| if i < 4 { None } else { *v })
            .collect();
        let out = ema_values(&shifted, 3);
        assert_eq!(out.iter().take_while(|v| v.is_none()).count(), 6);
        // Seed = mean(104, 105, 106).
        assert_eq!(out[6], Some(105.0));
    }

    #[test]
    fn ema_reseeds_after_interior_gap() {
        let input = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(6.0)];
        let out = ema_values(&input, 2);
        assert_eq!(out, vec![None, Some(1.5), None, None, Some(5.0)]);
    }

    #[test]
    fn ema_and_sma_coincide_on_linear_ramp() {
        // With an SMA seed both averages lag a linear ramp by (window - 1) / 2.
        let closes = ramp_30().closes();
        let e = ema(&closes, 10).get(29).unwrap();
        let s = sma(&closes, 10).get(29).unwrap();
        assert_eq!(s, 124.5);
        assert!((e - s).abs() < 1e-9, "EMA {e} vs SMA {s}");
    }

    #[test]
    fn ema_leads_sma_on_accelerating_series() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i * i) / 10.0).collect();
        let closes = series_from_closes(&closes).closes();
        let e = ema(&closes, 10).get(29).unwrap();
        let s = sma(&closes, 10).get(29).unwrap();
        assert!(e > s, "EMA {e} should exceed SMA {s} on an accelerating series");
    }
}
