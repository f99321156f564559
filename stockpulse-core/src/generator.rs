//! Mock OHLCV series generator.
//!
//! Produces a biased random walk ending at `today`, one point per calendar
//! day. The RNG is injected so the same seed always yields the same series.
//!
//! Draw order per step is fixed: price change, open offset, high wick,
//! low wick, volume base. The price floor is applied before the daily range
//! is derived from the new price.

use crate::domain::{PricePoint, Series};
use crate::indicators::round2;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Prices never walk below this value.
pub const PRICE_FLOOR: f64 = 1.0;

const OPEN_RANGE: f64 = 0.5;
const WICK_RANGE: f64 = 0.2;
const VOLUME_BASE_MIN: f64 = 1_000_000.0;
const VOLUME_BASE_SPAN: f64 = 9_000_000.0;
const VOLUME_CHANGE_WEIGHT: f64 = 10.0;

/// Parameters for one generated series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParams {
    /// Days of history before today; the series has `days + 1` points.
    pub days: u32,
    pub base_price: f64,
    /// Daily volatility as a fraction (0.02 = 2%).
    pub volatility: f64,
}

impl GeneratorParams {
    pub fn new(days: u32, base_price: f64, volatility: f64) -> Self {
        Self {
            days,
            base_price,
            volatility,
        }
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.days == 0 {
            return Err(GenerateError::InvalidDays);
        }
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(GenerateError::InvalidBasePrice(self.base_price));
        }
        if !(self.volatility > 0.0 && self.volatility <= 1.0) {
            return Err(GenerateError::InvalidVolatility(self.volatility));
        }
        Ok(())
    }
}

/// Errors from series generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("days must be positive")]
    InvalidDays,
    #[error("base price must be a positive finite number, got {0}")]
    InvalidBasePrice(f64),
    #[error("volatility must be in (0, 1], got {0}")]
    InvalidVolatility(f64),
    #[error("{days} days before {today} is outside the supported date range")]
    DateOutOfRange { today: NaiveDate, days: u32 },
}

/// Generate `days + 1` points ending at `today`, oldest first.
pub fn generate_series<R: Rng>(
    params: &GeneratorParams,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Series, GenerateError> {
    params.validate()?;

    let vol = params.volatility;
    let mut current = params.base_price;
    let mut points = Vec::with_capacity(params.days as usize + 1);

    for offset in (0..=params.days).rev() {
        let date = today
            .checked_sub_signed(Duration::days(i64::from(offset)))
            .ok_or(GenerateError::DateOutOfRange {
                today,
                days: params.days,
            })?;

        let change = (rng.gen::<f64>() - 0.5) * vol * current;
        current = (current + change).max(PRICE_FLOOR);

        let open = current - rng.gen::<f64>() * vol * current * OPEN_RANGE;
        let high = open.max(current) + rng.gen::<f64>() * vol * current * WICK_RANGE;
        let low = open.min(current) - rng.gen::<f64>() * vol * current * WICK_RANGE;

        let volume_base = VOLUME_BASE_MIN + rng.gen::<f64>() * VOLUME_BASE_SPAN;
        let volume_multiplier = 1.0 + (change / current).abs() * VOLUME_CHANGE_WEIGHT;
        let volume = (volume_base * volume_multiplier).round() as u64;

        points.push(PricePoint::new(
            date,
            round2(open),
            round2(high),
            round2(low),
            round2(current),
            volume,
        ));
    }

    debug!(
        days = params.days,
        base_price = params.base_price,
        volatility = vol,
        last_price = current,
        "generated mock series"
    );

    Ok(Series::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::VecDeque;

    /// Replays a fixed list of unit draws. Each value must be a multiple of
    /// 2^-53 so `gen::<f64>()` returns it exactly.
    struct ScriptedRng(VecDeque<f64>);

    impl ScriptedRng {
        fn new(draws: &[f64]) -> Self {
            Self(draws.iter().copied().collect())
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let unit = self.0.pop_front().expect("script exhausted");
            ((unit * (1u64 << 53) as f64) as u64) << 11
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    #[test]
    fn length_is_days_plus_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = generate_series(&GeneratorParams::new(30, 2550.75, 0.02), today(), &mut rng).unwrap();
        assert_eq!(s.len(), 31);
    }

    #[test]
    fn ends_today_and_ascends() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = generate_series(&GeneratorParams::new(5, 100.0, 0.02), today(), &mut rng).unwrap();
        assert_eq!(s.last().unwrap().date(), today());
        assert_eq!(s.first().unwrap().date(), today() - Duration::days(5));
        for w in s.points().windows(2) {
            assert!(w[0].date() < w[1].date());
        }
        assert_eq!(s.last().unwrap().label(), "28 Jun");
    }

    #[test]
    fn same_seed_same_series() {
        let params = GeneratorParams::new(90, 1456.10, 0.03);
        let a = generate_series(&params, today(), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_series(&params, today(), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        let c = generate_series(&params, today(), &mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn every_point_is_sane() {
        let params = GeneratorParams::new(365, 527.80, 0.06);
        let s = generate_series(&params, today(), &mut StdRng::seed_from_u64(1)).unwrap();
        for p in s.iter() {
            assert!(p.is_sane(), "insane point {p:?}");
            assert!(p.low() <= p.open().min(p.close()));
            assert!(p.high() >= p.open().max(p.close()));
            assert!(p.close() >= PRICE_FLOOR);
            assert!(p.volume() >= 1_000_000);
        }
    }

    #[test]
    fn price_floor_holds_under_max_volatility() {
        let params = GeneratorParams::new(500, 1.5, 1.0);
        let s = generate_series(&params, today(), &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(s.iter().all(|p| p.price() >= PRICE_FLOOR));
    }

    #[test]
    fn prices_are_rounded_to_cents() {
        let params = GeneratorParams::new(20, 3450.20, 0.02);
        let s = generate_series(&params, today(), &mut StdRng::seed_from_u64(3)).unwrap();
        for p in s.iter() {
            for v in [p.open(), p.high(), p.low(), p.close()] {
                assert_eq!(round2(v), v);
            }
        }
    }

    #[test]
    fn rejects_invalid_params() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_series(&GeneratorParams::new(0, 100.0, 0.02), today(), &mut rng),
            Err(GenerateError::InvalidDays)
        );
        assert!(matches!(
            generate_series(&GeneratorParams::new(10, -5.0, 0.02), today(), &mut rng),
            Err(GenerateError::InvalidBasePrice(_))
        ));
        assert!(matches!(
            generate_series(&GeneratorParams::new(10, 100.0, 0.0), today(), &mut rng),
            Err(GenerateError::InvalidVolatility(_))
        ));
        assert!(matches!(
            generate_series(&GeneratorParams::new(10, 100.0, 1.5), today(), &mut rng),
            Err(GenerateError::InvalidVolatility(_))
        ));
    }

    #[test]
    fn draws_follow_fixed_step_order() {
        // change, open, high, low, volume for each of two steps
        let mut rng = ScriptedRng::new(&[
            0.75, 0.25, 0.5, 0.125, 0.375, //
            0.125, 0.625, 0.875, 0.0625, 0.5,
        ]);
        let s = generate_series(&GeneratorParams::new(1, 100.0, 0.02), today(), &mut rng).unwrap();

        let first = s.get(0).unwrap();
        assert_eq!(first.open(), 100.25);
        assert_eq!(first.high(), 100.7);
        assert_eq!(first.low(), 100.2);
        assert_eq!(first.close(), 100.5);
        assert_eq!(first.volume(), 4_592_662);

        let second = s.get(1).unwrap();
        assert_eq!(second.open(), 99.12);
        assert_eq!(second.high(), 100.1);
        assert_eq!(second.low(), 99.1);
        assert_eq!(second.close(), 99.75);
        assert_eq!(second.volume(), 5_915_617);
    }

    #[test]
    fn floor_applies_before_daily_range() {
        // a 25% drop from 1.0 is floored, then the range is taken off 1.0
        let mut rng = ScriptedRng::new(&[0.0, 0.25, 0.5, 0.25, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let s = generate_series(&GeneratorParams::new(1, 1.0, 0.5), today(), &mut rng).unwrap();
        let first = s.get(0).unwrap();
        assert_eq!(first.close(), PRICE_FLOOR);
        assert_eq!(first.open(), 0.94);
        assert_eq!(first.high(), 1.05);
        assert_eq!(first.low(), 0.91);
        assert_eq!(first.volume(), 19_250_000);
    }

    #[test]
    fn volume_grows_with_relative_change() {
        let first_volume = |change_draw: f64| {
            let mut rng = ScriptedRng::new(&[
                change_draw, 0.5, 0.5, 0.5, 0.5, //
                0.5, 0.5, 0.5, 0.5, 0.5,
            ]);
            let s = generate_series(&GeneratorParams::new(1, 100.0, 0.02), today(), &mut rng)
                .unwrap();
            s.get(0).unwrap().volume()
        };
        let flat = first_volume(0.5);
        let up = first_volume(0.75);
        let big_up = first_volume(0.875);
        let down = first_volume(0.25);
        assert_eq!(flat, 5_500_000);
        assert!(up > flat);
        assert!(big_up > up);
        assert!(down > flat);
    }

    #[test]
    fn date_underflow_is_an_error() {
        let today = NaiveDate::MIN + Duration::days(3);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_series(&GeneratorParams::new(30, 100.0, 0.02), today, &mut rng),
            Err(GenerateError::DateOutOfRange { today, days: 30 })
        );
        let s = generate_series(&GeneratorParams::new(3, 100.0, 0.02), today, &mut rng).unwrap();
        assert_eq!(s.first().unwrap().date(), NaiveDate::MIN);
    }
}
