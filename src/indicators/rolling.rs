// =============================================================================
// Rolling Window Primitives
// =============================================================================
//
// Trailing-window reductions over an optional-valued series.  The output at
// index `i` covers inputs `i + 1 - window ..= i` and is:
//   - undefined for `i < window - 1` (not enough history yet);
//   - undefined when any input inside the window is undefined;
//   - otherwise the reduction of the window.
//
// Each window is reduced from scratch rather than with a running sum, so a
// constant input yields an exactly constant mean and an exactly zero
// standard deviation.
// =============================================================================

/// Apply `reduce` to every complete, fully defined trailing window.
///
/// `window == 0` yields an all-undefined result.
pub fn rolling(
    values: &[Option<f64>],
    window: usize,
    reduce: impl Fn(&[f64]) -> f64,
) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut buf: Vec<f64> = Vec::with_capacity(window);
    for end in (window - 1)..values.len() {
        buf.clear();
        buf.extend(values[end + 1 - window..=end].iter().map_while(|v| *v));
        if buf.len() == window {
            let reduced = reduce(&buf);
            if reduced.is_finite() {
                out[end] = Some(reduced);
            }
        }
    }
    out
}

pub fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Population standard deviation (divisor = window length).
pub fn std_population(window: &[f64]) -> f64 {
    let m = mean(window);
    let variance = window.iter().map(|x| (x - m).powi(2)).sum::<f64>() / window.len() as f64;
    variance.sqrt()
}

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, mean)
}

pub fn rolling_std_population(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, std_population)
}

pub fn rolling_min(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn rolling_max(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}
