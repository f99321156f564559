//! PricePoint: one trading-period observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Label format for the calendar date: two-digit day, abbreviated month ("05 Mar").
pub const DATE_LABEL_FORMAT: &str = "%d %b";

/// OHLCV observation for a single day.
///
/// Base fields are fixed at construction. `price` always equals `close`; it is
/// the field every indicator reads. Derived values live in [`Indicators`] and
/// are written by the indicator engine only. Deserialization goes through
/// [`PricePoint::new`], so stored `price` and `label` must agree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PricePointRecord")]
pub struct PricePoint {
    date: NaiveDate,
    label: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    price: f64,
    volume: u64,
    indicators: Indicators,
}

/// Wire shape of a point. `price` and `label` are derived, so they may be
/// omitted; when present they are checked against `close` and `date`.
#[derive(Deserialize)]
pub struct PricePointRecord {
    date: NaiveDate,
    #[serde(default)]
    label: Option<String>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    price: Option<f64>,
    volume: u64,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointError {
    #[error("price {price} does not match close {close}")]
    PriceMismatch { price: f64, close: f64 },
    #[error("label {label:?} does not match date (expected {expected:?})")]
    LabelMismatch { label: String, expected: String },
}

impl TryFrom<PricePointRecord> for PricePoint {
    type Error = PointError;

    fn try_from(r: PricePointRecord) -> Result<Self, Self::Error> {
        let point = PricePoint::new(r.date, r.open, r.high, r.low, r.close, r.volume)
            .with_indicators(r.indicators);
        if let Some(price) = r.price {
            if price != point.price {
                return Err(PointError::PriceMismatch {
                    price,
                    close: point.close,
                });
            }
        }
        if let Some(label) = r.label {
            if label != point.label {
                return Err(PointError::LabelMismatch {
                    label,
                    expected: point.label,
                });
            }
        }
        Ok(point)
    }
}

impl PricePoint {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            label: date.format(DATE_LABEL_FORMAT).to_string(),
            open,
            high,
            low,
            close,
            price: close,
            volume,
            indicators: Indicators::default(),
        }
    }

    /// Replace the derived fields wholesale (a full recompute).
    pub fn with_indicators(mut self, indicators: Indicators) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn volume(&self) -> u64 {
        self.volume
    }

    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    pub(crate) fn indicators_mut(&mut self) -> &mut Indicators {
        &mut self.indicators
    }

    /// OHLC sanity check: low <= open/close/price <= high, all prices positive.
    pub fn is_sane(&self) -> bool {
        let fields = [self.open, self.high, self.low, self.close, self.price];
        if fields.iter().any(|v| !v.is_finite()) {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.low > 0.0
    }
}

/// Derived analytic fields for one point.
///
/// Every field is optional: `None` means "not yet available" (inside the
/// indicator's warmup window), never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Simple moving averages keyed by period.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sma: BTreeMap<usize, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_band: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_band: Option<f64>,
}

impl Indicators {
    pub fn sma(&self, period: usize) -> Option<f64> {
        self.sma.get(&period).copied()
    }

    pub fn sma5(&self) -> Option<f64> {
        self.sma(5)
    }

    pub fn sma10(&self) -> Option<f64> {
        self.sma(10)
    }

    pub fn sma20(&self) -> Option<f64> {
        self.sma(20)
    }

    pub fn sma50(&self) -> Option<f64> {
        self.sma(50)
    }

    pub fn sma200(&self) -> Option<f64> {
        self.sma(200)
    }

    /// Band width (upper - lower) when both bands are available.
    pub fn band_width(&self) -> Option<f64> {
        Some(self.upper_band? - self.lower_band?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
