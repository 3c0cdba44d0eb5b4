// =============================================================================
// Shared types used across the Aurora chart engine
// =============================================================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Series
// =============================================================================

/// A date-aligned sequence of optional values.
///
/// `None` means "no data yet" (e.g. the first `window - 1` points of a rolling
/// computation, or a point where the computation is undefined). It is never a
/// stand-in for zero, so renderers must leave a gap rather than draw it.
///
/// The date axis is reference counted and shared with the price series it was
/// derived from, so every derived series has exactly the same length and
/// dates as its input.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    #[serde(skip)]
    dates: Arc<[NaiveDate]>,
    values: Vec<Option<f64>>,
}

impl Series {
    /// Build a series over `dates`.
    ///
    /// # Panics
    /// Panics when `values` and `dates` differ in length. Every constructor in
    /// the crate derives `values` from an input of the same length, so a
    /// mismatch is a programming error.
    pub fn new(dates: Arc<[NaiveDate]>, values: Vec<Option<f64>>) -> Self {
        assert_eq!(
            dates.len(),
            values.len(),
            "series values must align with the date axis"
        );
        Self { dates, values }
    }

    /// A series with every point undefined.
    pub fn undefined(dates: Arc<[NaiveDate]>) -> Self {
        let values = vec![None; dates.len()];
        Self { dates, values }
    }

    /// Derive a new series on the same date axis.
    pub fn with_values(&self, values: Vec<Option<f64>>) -> Self {
        Self::new(Arc::clone(&self.dates), values)
    }

    /// Combine two aligned series point by point. The result is undefined
    /// wherever either side is undefined.
    pub fn zip_with(&self, other: &Series, f: impl Fn(f64, f64) -> f64) -> Self {
        debug_assert!(self.is_aligned_with(other));
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some(f(*a, *b)),
                _ => None,
            })
            .collect();
        self.with_values(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Value at `index`; `None` when undefined or out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Most recent value, if defined.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Number of undefined points before the first defined one.
    pub fn leading_undefined(&self) -> usize {
        self.values.iter().take_while(|v| v.is_none()).count()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Iterate `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// True when both series share the same date axis.
    pub fn is_aligned_with(&self, other: &Series) -> bool {
        Arc::ptr_eq(&self.dates, &other.dates) || self.dates == other.dates
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.is_aligned_with(other) && self.values == other.values
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Sign classification that drives up/down coloring of bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Non-negative values are `Up`; negative and undefined values are `Down`.
    pub fn of(value: Option<f64>) -> Self {
        match value {
            Some(v) if v >= 0.0 => Self::Up,
            _ => Self::Down,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
        }
    }
}
