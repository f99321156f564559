//! Summary verdict for the last point of a series.

use super::AnalysisError;
use crate::config::SummaryThresholds;
use crate::domain::{AnalysisSummary, Recommendation, Series, Strength, Trend};
use crate::indicators::round2;

/// Summarize with the standard thresholds (70/30/60/40, quartile levels).
pub fn summarize(series: &Series) -> Result<AnalysisSummary, AnalysisError> {
    summarize_with(series, &SummaryThresholds::default())
}

/// Summarize an annotated series.
///
/// Trend compares the last price with its SMA 20 and SMA 50 and sets the
/// base recommendation. An available RSI then decides strength, and the
/// overbought/oversold zones override the recommendation. Support and
/// resistance are order statistics of the whole price column.
pub fn summarize_with(
    series: &Series,
    thresholds: &SummaryThresholds,
) -> Result<AnalysisSummary, AnalysisError> {
    let last = series.last().ok_or(AnalysisError::EmptySeries)?;
    let price = last.price();
    let ind = last.indicators();

    let (trend, mut recommendation) = match (ind.sma20(), ind.sma50()) {
        (Some(sma20), Some(sma50)) if price > sma20 && sma20 > sma50 => {
            (Trend::Bullish, Recommendation::Buy)
        }
        (Some(sma20), Some(sma50)) if price < sma20 && sma20 < sma50 => {
            (Trend::Bearish, Recommendation::Sell)
        }
        _ => (Trend::Neutral, Recommendation::Hold),
    };

    let strength = match ind.rsi {
        Some(rsi) if rsi > thresholds.overbought => {
            recommendation = Recommendation::Sell;
            Strength::Overbought
        }
        Some(rsi) if rsi < thresholds.oversold => {
            recommendation = Recommendation::Buy;
            Strength::Oversold
        }
        Some(rsi) if rsi > thresholds.strong => Strength::Strong,
        Some(rsi) if rsi < thresholds.weak => Strength::Weak,
        _ => Strength::Moderate,
    };

    let mut prices = series.prices();
    prices.sort_by(f64::total_cmp);

    Ok(AnalysisSummary {
        trend,
        strength,
        support: round2(quantile(&prices, thresholds.support_quantile)),
        resistance: round2(quantile(&prices, thresholds.resistance_quantile)),
        recommendation,
    })
}

/// Element at `floor(len * q)` of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() as f64) * q).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
