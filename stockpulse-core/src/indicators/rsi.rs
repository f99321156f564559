//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 (with losses) → RSI = 0.
//! A zero price change counts as a gain of 0.

use super::round2;
use crate::domain::Series;
use crate::indicator::Indicator;
use tracing::warn;

pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(DEFAULT_RSI_PERIOD)
    }
}

/// Raw RSI values (unrounded), `None` before index `period`.
pub fn rsi_values(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = prices.len();
    let mut result = vec![None; n];

    if period == 0 || n <= period {
        return result;
    }

    // Seed: average gain and average loss over the first `period` changes
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = prices[i] - prices[i - 1];
        if change >= 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = Some(compute_rsi(avg_gain, avg_loss));

    let p = period as f64;
    for i in (period + 1)..n {
        let change = prices[i] - prices[i - 1];
        let (gain, loss) = if change >= 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };

        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;

        result[i] = Some(compute_rsi(avg_gain, avg_loss));
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn annotate(&self, series: &mut Series) {
        if series.len() <= self.period {
            return;
        }
        let values = rsi_values(&series.prices(), self.period);
        for (point, value) in series.points_mut().iter_mut().zip(values) {
            point.indicators_mut().rsi = value.map(round2);
        }
    }
}

/// Annotate a copy of `series` with RSI. Unmodified when `len <= period`.
pub fn apply_rsi(series: &Series, period: usize) -> Series {
    if period == 0 {
        warn!("skipping RSI with period 0");
        return series.clone();
    }
    Rsi::new(period).apply(series)
}
