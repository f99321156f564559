//! Serializable analysis configuration.
//!
//! Every field has a default, so an empty TOML file is a valid config and a
//! partial file only overrides what it names.

use crate::indicators::{bollinger, macd, rsi, STANDARD_SMA_PERIODS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Indicator parameters and summary thresholds for one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// SMA periods to compute, in order.
    pub sma_periods: Vec<usize>,
    pub rsi: RsiConfig,
    pub macd: MacdConfig,
    pub bollinger: BollingerConfig,
    pub summary: SummaryThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RsiConfig {
    pub period: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BollingerConfig {
    pub period: usize,
    pub multiplier: f64,
}

/// RSI zones and price quantiles used by the summary verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryThresholds {
    pub overbought: f64,
    pub oversold: f64,
    pub strong: f64,
    pub weak: f64,
    pub support_quantile: f64,
    pub resistance_quantile: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_periods: STANDARD_SMA_PERIODS.to_vec(),
            rsi: RsiConfig::default(),
            macd: MacdConfig::default(),
            bollinger: BollingerConfig::default(),
            summary: SummaryThresholds::default(),
        }
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: rsi::DEFAULT_RSI_PERIOD,
        }
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: macd::DEFAULT_FAST_PERIOD,
            slow: macd::DEFAULT_SLOW_PERIOD,
            signal: macd::DEFAULT_SIGNAL_PERIOD,
        }
    }
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: bollinger::DEFAULT_BOLLINGER_PERIOD,
            multiplier: bollinger::DEFAULT_BOLLINGER_MULTIPLIER,
        }
    }
}

impl Default for SummaryThresholds {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
            strong: 60.0,
            weak: 40.0,
            support_quantile: 0.25,
            resistance_quantile: 0.75,
        }
    }
}

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{indicator} period must be >= 1")]
    ZeroPeriod { indicator: &'static str },
    #[error("MACD fast period ({fast}) must be shorter than slow period ({slow})")]
    MacdOrder { fast: usize, slow: usize },
    #[error("Bollinger multiplier must be positive, got {0}")]
    BollingerMultiplier(f64),
    #[error("RSI thresholds must satisfy 0 <= oversold <= weak <= strong <= overbought <= 100")]
    RsiThresholds,
    #[error("quantiles must satisfy 0 <= support <= resistance < 1, got {support} / {resistance}")]
    Quantiles { support: f64, resistance: f64 },
}

impl AnalysisConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sma_periods.contains(&0) {
            return Err(ConfigError::ZeroPeriod { indicator: "SMA" });
        }
        if self.rsi.period == 0 {
            return Err(ConfigError::ZeroPeriod { indicator: "RSI" });
        }
        if self.macd.fast == 0 || self.macd.slow == 0 || self.macd.signal == 0 {
            return Err(ConfigError::ZeroPeriod { indicator: "MACD" });
        }
        if self.macd.fast >= self.macd.slow {
            return Err(ConfigError::MacdOrder {
                fast: self.macd.fast,
                slow: self.macd.slow,
            });
        }
        if self.bollinger.period == 0 {
            return Err(ConfigError::ZeroPeriod {
                indicator: "Bollinger",
            });
        }
        if !(self.bollinger.multiplier > 0.0 && self.bollinger.multiplier.is_finite()) {
            return Err(ConfigError::BollingerMultiplier(self.bollinger.multiplier));
        }
        self.summary.validate()
    }
}

impl SummaryThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = [
            0.0,
            self.oversold,
            self.weak,
            self.strong,
            self.overbought,
            100.0,
        ];
        if ordered.windows(2).any(|w| !(w[0] <= w[1])) {
            return Err(ConfigError::RsiThresholds);
        }
        let (s, r) = (self.support_quantile, self.resistance_quantile);
        if !(0.0..1.0).contains(&s) || !(0.0..1.0).contains(&r) || s > r {
            return Err(ConfigError::Quantiles {
                support: s,
                resistance: r,
            });
        }
        Ok(())
    }
}
