//! Simple Moving Average (SMA).
//!
//! Mean of price over a trailing window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::round2;
use crate::domain::Series;
use crate::indicator::Indicator;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Raw trailing means, `None` before the first full window.
pub fn sma_values(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; prices.len()];
    if period == 0 || prices.len() < period {
        return result;
    }
    for (offset, window) in prices.windows(period).enumerate() {
        let sum: f64 = window.iter().sum();
        result[offset + period - 1] = Some(sum / period as f64);
    }
    result
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn annotate(&self, series: &mut Series) {
        let values = sma_values(&series.prices(), self.period);
        for (point, value) in series.points_mut().iter_mut().zip(values) {
            let sma = &mut point.indicators_mut().sma;
            match value {
                Some(v) => {
                    sma.insert(self.period, round2(v));
                }
                None => {
                    sma.remove(&self.period);
                }
            }
        }
    }
}

/// Annotate a copy of `series` with one SMA per requested period.
///
/// Zero periods have no valid window and are skipped.
pub fn apply_sma(series: &Series, periods: &[usize]) -> Series {
    let mut out = series.clone();
    for &period in periods {
        if period == 0 {
            warn!("skipping SMA with period 0");
            continue;
        }
        Sma::new(period).annotate(&mut out);
    }
    out
}
