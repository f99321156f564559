//! Per-indicator observations read off the tail of an annotated series.
//!
//! Each observation that needs a value the series does not carry yet comes
//! back `false` (or `None` where the answer is genuinely three-valued).

use crate::config::SummaryThresholds;
use crate::domain::{PricePoint, Series};
use serde::{Deserialize, Serialize};

/// Points between the two band widths compared for the width trend.
pub const BAND_WIDTH_LOOKBACK: usize = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentumBand {
    Strong,
    Weak,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandWidthTrend {
    Contracting,
    Expanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovingAverageSignals {
    /// SMA 50 above SMA 200.
    pub golden_cross: bool,
    /// SMA 50 below SMA 200.
    pub death_cross: bool,
    pub price_above_sma20: bool,
    /// SMA 5 above SMA 20.
    pub short_term_momentum: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiSignals {
    pub value: Option<f64>,
    pub overbought: bool,
    pub oversold: bool,
    pub momentum: MomentumBand,
    /// RSI higher than on the previous point.
    pub rising: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MacdSignals {
    /// MACD line above its signal line.
    pub bullish: bool,
    pub above_zero: bool,
    /// Histogram higher than on the previous point.
    pub histogram_rising: bool,
    /// MACD crossed its signal between the third- and second-to-last points.
    pub recent_crossover: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BollingerSignals {
    pub above_upper: bool,
    pub below_lower: bool,
    pub width_trend: Option<BandWidthTrend>,
    /// Price above the middle band (SMA 20).
    pub upper_half: bool,
}

/// Everything the analysis view narrates about the latest point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSignals {
    pub moving_averages: MovingAverageSignals,
    pub rsi: RsiSignals,
    pub macd: MacdSignals,
    pub bollinger: BollingerSignals,
}

impl TechnicalSignals {
    /// Signals with the standard RSI zones. `None` for an empty series.
    pub fn from_series(series: &Series) -> Option<Self> {
        Self::with_thresholds(series, &SummaryThresholds::default())
    }

    pub fn with_thresholds(series: &Series, thresholds: &SummaryThresholds) -> Option<Self> {
        let last = series.last()?;
        let prev = series.from_end(1);
        Some(Self {
            moving_averages: moving_average_signals(last),
            rsi: rsi_signals(last, prev, thresholds),
            macd: macd_signals(series, last, prev),
            bollinger: bollinger_signals(series, last),
        })
    }
}

fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

fn moving_average_signals(last: &PricePoint) -> MovingAverageSignals {
    let ind = last.indicators();
    MovingAverageSignals {
        golden_cross: gt(ind.sma50(), ind.sma200()),
        death_cross: lt(ind.sma50(), ind.sma200()),
        price_above_sma20: gt(Some(last.price()), ind.sma20()),
        short_term_momentum: gt(ind.sma5(), ind.sma20()),
    }
}

fn rsi_signals(
    last: &PricePoint,
    prev: Option<&PricePoint>,
    thresholds: &SummaryThresholds,
) -> RsiSignals {
    let value = last.indicators().rsi;
    let momentum = match value {
        Some(v) if v > thresholds.strong => MomentumBand::Strong,
        Some(v) if v < thresholds.weak => MomentumBand::Weak,
        _ => MomentumBand::Neutral,
    };
    RsiSignals {
        value,
        overbought: gt(value, Some(thresholds.overbought)),
        oversold: lt(value, Some(thresholds.oversold)),
        momentum,
        rising: gt(value, prev.and_then(|p| p.indicators().rsi)),
    }
}

fn macd_signals(series: &Series, last: &PricePoint, prev: Option<&PricePoint>) -> MacdSignals {
    let ind = last.indicators();
    MacdSignals {
        bullish: gt(ind.macd, ind.signal),
        above_zero: gt(ind.macd, Some(0.0)),
        histogram_rising: gt(ind.histogram, prev.and_then(|p| p.indicators().histogram)),
        recent_crossover: recent_crossover(series),
    }
}

fn recent_crossover(series: &Series) -> bool {
    let (Some(before), Some(after)) = (series.from_end(2), series.from_end(1)) else {
        return false;
    };
    let (b, a) = (before.indicators(), after.indicators());
    let (Some(bm), Some(bs), Some(am), Some(as_)) = (b.macd, b.signal, a.macd, a.signal) else {
        return false;
    };
    (bm < bs && am > as_) || (bm > bs && am < as_)
}

fn bollinger_signals(series: &Series, last: &PricePoint) -> BollingerSignals {
    let ind = last.indicators();
    let price = Some(last.price());
    let width_trend = series
        .from_end(BAND_WIDTH_LOOKBACK)
        .and_then(|earlier| Some((ind.band_width()?, earlier.indicators().band_width()?)))
        .map(|(now, then)| {
            if now < then {
                BandWidthTrend::Contracting
            } else {
                BandWidthTrend::Expanding
            }
        });
    BollingerSignals {
        above_upper: gt(price, ind.upper_band),
        below_lower: lt(price, ind.lower_band),
        width_trend,
        upper_half: ind.upper_band.is_some()
            && ind.lower_band.is_some()
            && gt(price, ind.sma20()),
    }
}
