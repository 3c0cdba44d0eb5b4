// =============================================================================
// Engine Errors
// =============================================================================
//
// Two failure families exist inside the core:
//   - DataError:   the price series violates an input invariant.
//   - ConfigError: an indicator parameter is outside its allowed bounds.
//
// Both are raised before any computation runs, so a caller never sees a
// partially computed result.  A zero stochastic range is NOT an error; the
// affected point is simply undefined.
// =============================================================================

use chrono::NaiveDate;
use thiserror::Error;

/// The price series handed to the engine is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("price series is empty")]
    Empty,

    #[error("bar {index}: date {date} is not after previous date {previous}")]
    NotAscending {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("bar {index}: duplicate date {date}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("bar {index}: {field} must be positive, got {value}")]
    NonPositivePrice {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("bar {index}: volume must be non-negative, got {value}")]
    NegativeVolume { index: usize, value: f64 },

    #[error("bar {index}: {field} is not a finite number")]
    NonFinite { index: usize, field: &'static str },

    #[error("record {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: cannot parse date `{raw}`")]
    InvalidDate { index: usize, raw: String },
}

/// An indicator parameter is outside its configured bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} window {value} is outside [{min}, {max}]")]
    WindowOutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("bollinger basis {basis} references a moving average that is not enabled")]
    BasisNotEnabled { basis: &'static str },

    #[error("invalid {indicator} parameters: {reason}")]
    InvalidOscillatorParams {
        indicator: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_names_violated_invariant() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let err = DataError::DuplicateDate { index: 3, date };
        assert_eq!(err.to_string(), "bar 3: duplicate date 2024-01-02");
    }

    #[test]
    fn config_error_reports_bounds() {
        let err = ConfigError::WindowOutOfRange {
            name: "sma1",
            value: 5,
            min: 10,
            max: 200,
        };
        assert_eq!(err.to_string(), "sma1 window 5 is outside [10, 200]");
    }
}
