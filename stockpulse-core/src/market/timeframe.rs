//! Timeframes and exchanges selectable on the chart and analysis pages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown timeframe '{0}' (expected one of 1d, 1w, 1mo, 3mo, 6mo, 1y, 5y)")]
    Timeframe(String),
    #[error("unknown exchange '{0}' (expected NSE or BSE)")]
    Exchange(String),
}

/// History window of a generated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[default]
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Timeframe {
    pub const ALL: [Timeframe; 7] = [
        Timeframe::OneDay,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
        Timeframe::ThreeMonths,
        Timeframe::SixMonths,
        Timeframe::OneYear,
        Timeframe::FiveYears,
    ];

    /// Days of history generated before today.
    pub fn days(self) -> u32 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::OneWeek => 7,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::SixMonths => 180,
            Timeframe::OneYear => 365,
            Timeframe::FiveYears => 365 * 5,
        }
    }

    /// Daily volatility used for the random walk. Longer windows swing wider.
    pub fn volatility(self) -> f64 {
        match self {
            Timeframe::OneDay => 0.01,
            Timeframe::OneWeek => 0.015,
            Timeframe::OneMonth => 0.02,
            Timeframe::ThreeMonths => 0.03,
            Timeframe::SixMonths => 0.04,
            Timeframe::OneYear => 0.06,
            Timeframe::FiveYears => 0.08,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::OneDay => "1d",
            Timeframe::OneWeek => "1w",
            Timeframe::OneMonth => "1mo",
            Timeframe::ThreeMonths => "3mo",
            Timeframe::SixMonths => "6mo",
            Timeframe::OneYear => "1y",
            Timeframe::FiveYears => "5y",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == wanted)
            .ok_or_else(|| ParseError::Timeframe(s.to_string()))
    }
}

/// Listing exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    #[default]
    Nse,
    Bse,
}

impl Exchange {
    pub fn as_str(self) -> &'static str {
        match self {
            Exchange::Nse => "NSE",
            Exchange::Bse => "BSE",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NSE" => Ok(Exchange::Nse),
            "BSE" => Ok(Exchange::Bse),
            _ => Err(ParseError::Exchange(s.to_string())),
        }
    }
}
