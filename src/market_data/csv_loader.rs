// =============================================================================
// CSV Loader — `Date,Open,High,Low,Close,Volume`
// =============================================================================
//
// Ingestion adapter that turns a daily OHLCV CSV export into a validated
// `PriceSeries`.  Column lookup is by header name, so extra columns (e.g.
// `Adj Close`) are ignored and column order does not matter.
//
// Accepted date formats: `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS` (the time is
// dropped).  A missing or empty required field fails the whole load with a
// `DataError::MissingField`; no partial series is returned.
// =============================================================================

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::info;

use crate::error::DataError;
use crate::market_data::price_series::{PriceBar, PriceSeries};

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Open")]
    open: Option<f64>,
    #[serde(rename = "High")]
    high: Option<f64>,
    #[serde(rename = "Low")]
    low: Option<f64>,
    #[serde(rename = "Close")]
    close: Option<f64>,
    #[serde(rename = "Volume")]
    volume: Option<f64>,
}

impl RawBar {
    fn into_bar(self, index: usize) -> Result<PriceBar, DataError> {
        let missing = |field| DataError::MissingField { index, field };

        let raw_date = self
            .date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| missing("Date"))?;
        let date = parse_date(&raw_date).ok_or_else(|| DataError::InvalidDate {
            index,
            raw: raw_date.clone(),
        })?;

        Ok(PriceBar {
            date,
            open: self.open.ok_or_else(|| missing("Open"))?,
            high: self.high.ok_or_else(|| missing("High"))?,
            low: self.low.ok_or_else(|| missing("Low"))?,
            close: self.close.ok_or_else(|| missing("Close"))?,
            volume: self.volume.ok_or_else(|| missing("Volume"))?,
        })
    }
}

/// Parse a calendar date, tolerating a trailing time component.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Read and validate a price series from any CSV source.
pub fn read_price_csv<R: Read>(reader: R) -> Result<PriceSeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    for (index, record) in csv_reader.deserialize::<RawBar>().enumerate() {
        let raw = record.with_context(|| format!("failed to decode CSV record {index}"))?;
        bars.push(raw.into_bar(index)?);
    }

    let series = PriceSeries::new(bars)?;
    Ok(series)
}

/// Load and validate a price series from the CSV file at `path`.
pub fn load_price_csv(path: impl AsRef<Path>) -> Result<PriceSeries> {
    let path = path.as_ref();

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open price data at {}", path.display()))?;

    let series = read_price_csv(file)
        .with_context(|| format!("failed to load price data from {}", path.display()))?;

    info!(
        path = %path.display(),
        bars = series.len(),
        first = %series.first_date(),
        last = %series.last_date(),
        "price series loaded"
    );

    Ok(series)
}
