//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Upper: SMA(price, period) + mult * stddev(price, period)
//! - Lower: SMA(price, period) - mult * stddev(price, period)
//!
//! The middle band is the SMA itself and is not stored separately.
//! Uses population stddev (divide by N).
//! Lookback: period - 1.

use super::round2;
use crate::domain::Series;
use crate::indicator::Indicator;
use tracing::warn;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            name: format!("bollinger_{period}_{multiplier}"),
        }
    }
}

impl Default for Bollinger {
    fn default() -> Self {
        Self::new(DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_MULTIPLIER)
    }
}

/// Raw (upper, lower) bands, `None` before the first full window.
pub fn band_values(prices: &[f64], period: usize, multiplier: f64) -> Vec<Option<(f64, f64)>> {
    let mut result = vec![None; prices.len()];
    if period == 0 || prices.len() < period {
        return result;
    }

    for (offset, window) in prices.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|p| {
                let diff = p - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();
        result[offset + period - 1] = Some((mean + multiplier * stddev, mean - multiplier * stddev));
    }

    result
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn annotate(&self, series: &mut Series) {
        let values = band_values(&series.prices(), self.period, self.multiplier);
        for (point, value) in series.points_mut().iter_mut().zip(values) {
            let ind = point.indicators_mut();
            ind.upper_band = value.map(|(upper, _)| round2(upper));
            ind.lower_band = value.map(|(_, lower)| round2(lower));
        }
    }
}

/// Annotate a copy of `series` with upper and lower bands.
pub fn apply_bollinger_bands(series: &Series, period: usize, multiplier: f64) -> Series {
    if period == 0 {
        warn!("skipping Bollinger Bands with period 0");
        return series.clone();
    }
    Bollinger::new(period, multiplier).apply(series)
}
