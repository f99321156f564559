//! StockPulse Core: mock market data and the indicator engine.
//!
//! This crate contains everything behind the analysis views:
//! - Domain types (price points, series, summary verdicts)
//! - Seedable mock OHLCV generator
//! - SMA, EMA, RSI, MACD and Bollinger Band transforms
//! - Summary verdict and signal observations
//! - Configurable analysis pipeline
//! - Quote catalog, timeframes, exchanges and seed hierarchy
//! - Indian-market display formatting

pub mod analysis;
pub mod config;
pub mod domain;
pub mod format;
pub mod generator;
pub mod indicator;
pub mod indicators;
pub mod market;
pub mod pipeline;
pub mod rng;

pub use analysis::{summarize, summarize_with, AnalysisError, TechnicalSignals};
pub use config::{AnalysisConfig, ConfigError};
pub use domain::{AnalysisSummary, Indicators, PricePoint, Recommendation, Series, Strength, Trend};
pub use generator::{generate_series, GenerateError, GeneratorParams};
pub use indicator::Indicator;
pub use indicators::{apply_bollinger_bands, apply_macd, apply_rsi, apply_sma, ema};
pub use market::{AnalysisRequest, Exchange, StockInfo, Timeframe};
pub use pipeline::{Analysis, AnalysisPipeline, Report};
pub use rng::SeedHierarchy;
