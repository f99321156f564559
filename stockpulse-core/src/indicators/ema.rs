//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * value[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1)
//! Seed: simple mean of the first `period` values.
//!
//! The output is compact: element 0 corresponds to input index `period - 1`,
//! so it is `period - 1` shorter than the input.

/// EMA of an arbitrary series. Empty when there are fewer than `period` values.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len() - period + 1);

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    result.push(seed);

    let mut prev = seed;
    for &v in &values[period..] {
        let next = v * k + prev * (1.0 - k);
        result.push(next);
        prev = next;
    }

    result
}
