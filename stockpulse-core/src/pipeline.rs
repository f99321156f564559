//! Analysis pipeline orchestration.
//!
//! A configured, ordered set of indicators is applied to a series in one
//! pass, then the summary verdict and signal observations are read off the
//! annotated result.

use crate::analysis::{summarize_with, AnalysisError, TechnicalSignals};
use crate::config::{AnalysisConfig, ConfigError, SummaryThresholds};
use crate::domain::{AnalysisSummary, Series};
use crate::generator::{generate_series, GeneratorParams};
use crate::indicator::Indicator;
use crate::indicators::{Bollinger, Macd, Rsi, Sma};
use crate::market::{stock_info, AnalysisRequest, StockInfo};
use crate::rng::SeedHierarchy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Annotated series with its verdict and observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub series: Series,
    pub summary: AnalysisSummary,
    pub signals: TechnicalSignals,
}

/// A full analysis of one request: the quote it was priced from plus the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub request: AnalysisRequest,
    pub quote: StockInfo,
    #[serde(flatten)]
    pub report: Report,
}

#[derive(Debug)]
pub struct AnalysisPipeline {
    indicators: Vec<Box<dyn Indicator>>,
    thresholds: SummaryThresholds,
}

impl AnalysisPipeline {
    /// Build the indicator set described by `config`, in the order
    /// SMA, RSI, MACD, Bollinger.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut indicators: Vec<Box<dyn Indicator>> = config
            .sma_periods
            .iter()
            .map(|&p| Box::new(Sma::new(p)) as Box<dyn Indicator>)
            .collect();
        indicators.push(Box::new(Rsi::new(config.rsi.period)));
        indicators.push(Box::new(Macd::new(
            config.macd.fast,
            config.macd.slow,
            config.macd.signal,
        )));
        indicators.push(Box::new(Bollinger::new(
            config.bollinger.period,
            config.bollinger.multiplier,
        )));

        Ok(Self {
            indicators,
            thresholds: config.summary,
        })
    }

    pub fn indicators(&self) -> &[Box<dyn Indicator>] {
        &self.indicators
    }

    pub fn thresholds(&self) -> &SummaryThresholds {
        &self.thresholds
    }

    /// Number of leading points before every indicator carries a value.
    pub fn warmup(&self) -> usize {
        self.indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
    }

    /// Annotated copy of `series`. Any previously derived fields are cleared
    /// first, so re-running always yields a full recompute.
    pub fn run(&self, series: &Series) -> Series {
        let mut out = series.stripped();
        for indicator in &self.indicators {
            indicator.annotate(&mut out);
        }
        debug!(
            points = out.len(),
            indicators = self.indicators.len(),
            warmup = self.warmup(),
            "annotated series"
        );
        out
    }

    pub fn analyze(&self, series: &Series) -> Result<Report, AnalysisError> {
        let series = self.run(series);
        let summary = summarize_with(&series, &self.thresholds)?;
        let signals = TechnicalSignals::with_thresholds(&series, &self.thresholds)
            .ok_or(AnalysisError::EmptySeries)?;
        Ok(Report {
            series,
            summary,
            signals,
        })
    }

    /// Quote, generate and analyze a fresh series for `request`.
    ///
    /// The series starts from the quote's current price and takes its length
    /// and volatility from the request's timeframe.
    pub fn analyze_request(
        &self,
        request: &AnalysisRequest,
        seeds: &SeedHierarchy,
        today: NaiveDate,
    ) -> Result<Analysis, AnalysisError> {
        let mut rng = seeds.rng_for(request);
        let quote = stock_info(&request.symbol, &mut rng);
        let params = GeneratorParams::new(
            request.timeframe.days(),
            quote.current_price,
            request.timeframe.volatility(),
        );
        let series = generate_series(&params, today, &mut rng)?;
        debug!(
            symbol = %request.symbol,
            exchange = %request.exchange,
            timeframe = %request.timeframe,
            master_seed = seeds.master_seed(),
            "analyzing request"
        );
        Ok(Analysis {
            request: request.clone(),
            quote,
            report: self.analyze(&series)?,
        })
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self {
            indicators: vec![
                Box::new(Sma::new(5)),
                Box::new(Sma::new(10)),
                Box::new(Sma::new(20)),
                Box::new(Sma::new(50)),
                Box::new(Sma::new(200)),
                Box::new(Rsi::default()),
                Box::new(Macd::default()),
                Box::new(Bollinger::default()),
            ],
            thresholds: SummaryThresholds::default(),
        }
    }
}
