//! Concrete indicator implementations.
//!
//! Each indicator implements the `Indicator` trait and also has a free
//! `apply_*` function taking a series and returning an annotated copy.
//! Every written value is rounded to 2 decimals.
//!
//! MACD and Bollinger write several fields per point (macd/signal/histogram,
//! upper/lower band) from one pass over the series.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{apply_bollinger_bands, Bollinger};
pub use ema::ema;
pub use macd::{apply_macd, Macd, MacdPoint};
pub use rsi::{apply_rsi, Rsi};
pub use sma::{apply_sma, Sma};

/// Periods the analysis page plots.
pub const STANDARD_SMA_PERIODS: [usize; 5] = [5, 10, 20, 50, 200];

/// Round to 2 decimals. Negative zero is normalized to zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Build a series from prices for testing.
///
/// open = previous price (or price for the first point),
/// high = max(open, price) + 1.0, low = min(open, price) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_series(prices: &[f64]) -> crate::domain::Series {
    use crate::domain::PricePoint;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let open = if i == 0 { price } else { prices[i - 1] };
            PricePoint::new(
                base_date + chrono::Duration::days(i as i64),
                open,
                open.max(price) + 1.0,
                open.min(price) - 1.0,
                price,
                1000,
            )
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_half_cases() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(-3.456), -3.46);
    }

    #[test]
    fn round2_normalizes_negative_zero() {
        let r = round2(-1e-12);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }
}
