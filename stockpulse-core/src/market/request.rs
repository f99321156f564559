//! What the user asked to look at.

use super::timeframe::{Exchange, Timeframe};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SYMBOL: &str = "RELIANCE";

/// A (symbol, exchange, timeframe) selection. Any change to it means a
/// freshly generated series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub exchange: Exchange,
    pub timeframe: Timeframe,
}

impl AnalysisRequest {
    pub fn new(symbol: impl Into<String>, exchange: Exchange, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into().trim().to_ascii_uppercase(),
            exchange,
            timeframe,
        }
    }
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL, Exchange::default(), Timeframe::default())
    }
}
