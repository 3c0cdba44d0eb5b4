// =============================================================================
// Price Series — validated, immutable daily OHLCV bars
// =============================================================================
//
// The series is loaded once and never mutated.  Every derived indicator
// series shares this series' date axis, so recomputing indicators after a
// configuration change never copies the dates.
//
// Validation rules (first violation wins):
//   1. At least one bar.
//   2. Every price field finite and > 0, volume finite and >= 0.
//   3. Dates strictly increasing (gaps allowed, duplicates rejected).
// =============================================================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::types::Series;

/// A single daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// `close - open`; non-negative means the bar closed up.
    pub fn body(&self) -> f64 {
        self.close - self.open
    }

    fn validate(&self, index: usize) -> Result<(), DataError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ] {
            if !value.is_finite() {
                return Err(DataError::NonFinite { index, field });
            }
        }

        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if value <= 0.0 {
                return Err(DataError::NonPositivePrice { index, field, value });
            }
        }

        if self.volume < 0.0 {
            return Err(DataError::NegativeVolume {
                index,
                value: self.volume,
            });
        }

        Ok(())
    }
}

/// An immutable, validated sequence of bars in ascending date order.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
    dates: Arc<[NaiveDate]>,
}

impl PriceSeries {
    /// Validate `bars` and freeze them into a series.
    ///
    /// Fails fast with the first violated invariant; no partial series is
    /// ever returned.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, DataError> {
        if bars.is_empty() {
            return Err(DataError::Empty);
        }

        for (index, bar) in bars.iter().enumerate() {
            bar.validate(index)?;

            if index > 0 {
                let previous = bars[index - 1].date;
                if bar.date == previous {
                    return Err(DataError::DuplicateDate {
                        index,
                        date: bar.date,
                    });
                }
                if bar.date < previous {
                    return Err(DataError::NotAscending {
                        index,
                        date: bar.date,
                        previous,
                    });
                }
            }
        }

        let dates: Arc<[NaiveDate]> = bars.iter().map(|b| b.date).collect();
        Ok(Self { bars, dates })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn opens(&self) -> Series {
        self.column(|b| b.open)
    }

    pub fn highs(&self) -> Series {
        self.column(|b| b.high)
    }

    pub fn lows(&self) -> Series {
        self.column(|b| b.low)
    }

    pub fn closes(&self) -> Series {
        self.column(|b| b.close)
    }

    pub fn volumes(&self) -> Series {
        self.column(|b| b.volume)
    }

    fn column(&self, field: impl Fn(&PriceBar) -> f64) -> Series {
        let values = self.bars.iter().map(|b| Some(field(b))).collect();
        Series::new(Arc::clone(&self.dates), values)
    }
}
