//! Look-ahead contamination tests for every indicator.
//!
//! Invariant: no indicator value at point t may depend on prices at t+1 or later.
//!
//! Method: annotate a truncated series (points 0..100) and the full series
//! (points 0..250). Assert points 0..100 carry identical derived fields in
//! both runs. Any difference means the indicator is leaking future data into
//! past values.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stockpulse_core::indicators::{Bollinger, Macd, Rsi, Sma};
use stockpulse_core::{generate_series, AnalysisPipeline, GeneratorParams, Indicator, Series};

fn make_test_series(days: u32) -> Series {
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    generate_series(&GeneratorParams::new(days, 1500.0, 0.03), today, &mut rng).unwrap()
}

fn truncate(series: &Series, len: usize) -> Series {
    series.iter().take(len).cloned().collect()
}

/// Assert that the indicator writes identical fields for points 0..truncated_len
/// whether computed on a truncated or full series.
fn assert_no_lookahead(indicator: &dyn Indicator, full: &Series, truncated_len: usize) {
    let truncated = truncate(full, truncated_len);
    let full_result = indicator.apply(full);
    let truncated_result = indicator.apply(&truncated);

    assert_eq!(
        truncated_result.len(),
        truncated_len,
        "{}: truncated result length mismatch",
        indicator.name()
    );

    for i in 0..truncated_len {
        let t = truncated_result.get(i).unwrap().indicators();
        let f = full_result.get(i).unwrap().indicators();
        assert_eq!(
            t,
            f,
            "{}: look-ahead contamination at point {i}",
            indicator.name()
        );
    }
}

#[test]
fn lookahead_sma() {
    let series = make_test_series(249);
    assert_no_lookahead(&Sma::new(5), &series, 100);
    assert_no_lookahead(&Sma::new(20), &series, 100);
    assert_no_lookahead(&Sma::new(50), &series, 100);
}

#[test]
fn lookahead_rsi() {
    let series = make_test_series(249);
    assert_no_lookahead(&Rsi::new(14), &series, 100);
    assert_no_lookahead(&Rsi::new(7), &series, 100);
}

#[test]
fn lookahead_macd() {
    let series = make_test_series(249);
    assert_no_lookahead(&Macd::default(), &series, 100);
    assert_no_lookahead(&Macd::new(5, 35, 5), &series, 100);
}

#[test]
fn lookahead_bollinger() {
    let series = make_test_series(249);
    assert_no_lookahead(&Bollinger::default(), &series, 100);
    assert_no_lookahead(&Bollinger::new(10, 1.5), &series, 100);
}

#[test]
fn lookahead_full_pipeline() {
    let series = make_test_series(249);
    let pipeline = AnalysisPipeline::default();
    let full = pipeline.run(&series);
    let truncated = pipeline.run(&truncate(&series, 120));
    for i in 0..truncated.len() {
        assert_eq!(
            truncated.get(i).unwrap().indicators(),
            full.get(i).unwrap().indicators(),
            "pipeline look-ahead at point {i}"
        );
    }
}

#[test]
fn values_start_at_lookback() {
    let series = make_test_series(249);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(20)),
        Box::new(Rsi::default()),
        Box::new(Macd::default()),
        Box::new(Bollinger::default()),
    ];
    for indicator in &indicators {
        let out = indicator.apply(&series);
        let first = out
            .iter()
            .position(|p| !p.indicators().is_empty())
            .unwrap();
        assert_eq!(first, indicator.lookback(), "{}", indicator.name());
    }
}
