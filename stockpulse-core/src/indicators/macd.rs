//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(fast) - EMA(slow), aligned on the tail of the series.
//! Signal line = EMA(MACD line, signal period).
//! Histogram = MACD line - signal line.
//!
//! All three fields are written only where the signal line exists:
//! first value at index (slow - 1) + (signal - 1) for the usual fast < slow.

use super::{ema, round2};
use crate::domain::Series;
use crate::indicator::Indicator;
use tracing::warn;

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// One point of the MACD triplet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD periods must be >= 1"
        );
        Self {
            fast,
            slow,
            signal,
            name: format!("macd_{fast}_{slow}_{signal}"),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(DEFAULT_FAST_PERIOD, DEFAULT_SLOW_PERIOD, DEFAULT_SIGNAL_PERIOD)
    }
}

/// Raw MACD triplets (unrounded), `None` where the signal line does not exist.
pub fn macd_values(prices: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<Option<MacdPoint>> {
    let n = prices.len();
    let mut result = vec![None; n];

    let fast_ema = ema(prices, fast);
    let slow_ema = ema(prices, slow);

    // Both EMAs end at the last price; the MACD line covers the shorter tail.
    let line_len = fast_ema.len().min(slow_ema.len());
    if line_len == 0 {
        return result;
    }
    let fast_tail = &fast_ema[fast_ema.len() - line_len..];
    let slow_tail = &slow_ema[slow_ema.len() - line_len..];
    let macd_line: Vec<f64> = fast_tail
        .iter()
        .zip(slow_tail)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&macd_line, signal);
    if signal_line.is_empty() {
        return result;
    }

    let line_offset = macd_line.len() - signal_line.len();
    let start = n - signal_line.len();
    for (j, &sig) in signal_line.iter().enumerate() {
        let m = macd_line[line_offset + j];
        result[start + j] = Some(MacdPoint {
            macd: m,
            signal: sig,
            histogram: m - sig,
        });
    }

    result
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.fast.max(self.slow) + self.signal - 2
    }

    fn annotate(&self, series: &mut Series) {
        let values = macd_values(&series.prices(), self.fast, self.slow, self.signal);
        for (point, value) in series.points_mut().iter_mut().zip(values) {
            let ind = point.indicators_mut();
            ind.macd = value.map(|v| round2(v.macd));
            ind.signal = value.map(|v| round2(v.signal));
            ind.histogram = value.map(|v| round2(v.histogram));
        }
    }
}

/// Annotate a copy of `series` with macd, signal and histogram.
pub fn apply_macd(series: &Series, fast: usize, slow: usize, signal: usize) -> Series {
    if fast == 0 || slow == 0 || signal == 0 {
        warn!(fast, slow, signal, "skipping MACD with a zero period");
        return series.clone();
    }
    Macd::new(fast, slow, signal).apply(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series};

    #[test]
    fn constant_series_converges_to_zero() {
        let out = apply_macd(&make_series(&[250.0; 60]), 12, 26, 9);
        let mut computed = 0;
        for p in out.iter() {
            let ind = p.indicators();
            if let Some(m) = ind.macd {
                computed += 1;
                assert_eq!(m, 0.0);
                assert_eq!(ind.signal, Some(0.0));
                assert_eq!(ind.histogram, Some(0.0));
            }
        }
        // 60 - (26 - 1) - (9 - 1)
        assert_eq!(computed, 27);
    }

    #[test]
    fn first_value_index_follows_slow_and_signal() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let out = apply_macd(&make_series(&prices), 12, 26, 9);
        let first = out.iter().position(|p| p.indicators().macd.is_some());
        assert_eq!(first, Some(25 + 8));
        assert_eq!(Macd::default().lookback(), 33);
    }

    #[test]
    fn tail_alignment_known_values() {
        // fast=2, slow=3, signal=2 on 1..=6
        // EMA2 (k=2/3): seed 1.5 @1, then 2.5, 3.5, 4.5, 5.5 @2..5
        // EMA3 (k=1/2): seed 2.0 @2, then 3.0, 4.0, 5.0 @3..5
        // MACD line @2..5: 0.5, 0.5, 0.5, 0.5
        // Signal EMA2 of line: 0.5 @3, 0.5, 0.5
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let raw = macd_values(&prices, 2, 3, 2);
        assert!(raw[..3].iter().all(Option::is_none));
        for v in raw[3..].iter() {
            let v = v.unwrap();
            assert_approx(v.macd, 0.5, 1e-9);
            assert_approx(v.signal, 0.5, 1e-9);
            assert_approx(v.histogram, 0.0, 1e-9);
        }
    }

    #[test]
    fn rising_series_has_positive_macd() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let out = apply_macd(&make_series(&prices), 12, 26, 9);
        let last = out.last().unwrap().indicators();
        assert!(last.macd.unwrap() > 0.0);
    }

    #[test]
    fn short_series_leaves_fields_unset() {
        let prices: Vec<f64> = (0..30).map(|i| i as f64 + 1.0).collect();
        let out = apply_macd(&make_series(&prices), 12, 26, 9);
        assert!(out.iter().all(|p| p.indicators().macd.is_none()));
        assert!(out.iter().all(|p| p.indicators().histogram.is_none()));
    }

    #[test]
    fn empty_series() {
        assert!(macd_values(&[], 12, 26, 9).is_empty());
    }
}
