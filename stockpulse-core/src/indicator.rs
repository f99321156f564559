//! Indicator trait.
//!
//! Indicators are pure transforms: a price series in, the same series with
//! extra derived fields out. Base OHLCV fields are never touched.

use crate::domain::Series;

/// Trait for series annotators.
///
/// `annotate` writes derived fields into each point whose trailing window is
/// complete and leaves every earlier point unset. A series shorter than
/// `lookback() + 1` comes back with no values written at all.
///
/// # Look-ahead contamination guard
/// No value written at index t may depend on prices at t+1 or later.
pub trait Indicator: Send + Sync + std::fmt::Debug {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Index of the first point that can carry a value.
    fn lookback(&self) -> usize;

    /// Write this indicator's fields into `series` in place.
    fn annotate(&self, series: &mut Series);

    /// Annotated copy of `series`; the input is left untouched.
    fn apply(&self, series: &Series) -> Series {
        let mut out = series.clone();
        self.annotate(&mut out);
        out
    }
}
