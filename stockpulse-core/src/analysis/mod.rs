//! Verdicts over an annotated series.
//!
//! `summarize` reduces a series to trend, strength, support, resistance and a
//! recommendation. `TechnicalSignals` collects the per-indicator observations
//! read off the last few points.

pub mod signals;
pub mod summary;

pub use signals::{
    BandWidthTrend, BollingerSignals, MacdSignals, MomentumBand, MovingAverageSignals, RsiSignals,
    TechnicalSignals,
};
pub use summary::{summarize, summarize_with};

use crate::generator::GenerateError;
use thiserror::Error;

/// Errors from producing an analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("cannot analyze an empty series")]
    EmptySeries,
    #[error("series generation failed: {0}")]
    Generate(#[from] GenerateError),
}
