//! Text, table and CSV rendering for CLI output.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use stockpulse_core::analysis::{BandWidthTrend, MomentumBand, TechnicalSignals};
use stockpulse_core::config::SummaryThresholds;
use stockpulse_core::format::{format_change, format_number, format_price, format_volume};
use stockpulse_core::{Analysis, Series, StockInfo};

/// One flat CSV row per point; unset indicators are written as empty cells.
#[derive(Debug, Serialize)]
struct SeriesRow {
    date: String,
    label: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    sma5: Option<f64>,
    sma10: Option<f64>,
    sma20: Option<f64>,
    sma50: Option<f64>,
    sma200: Option<f64>,
    rsi: Option<f64>,
    macd: Option<f64>,
    signal: Option<f64>,
    histogram: Option<f64>,
    upper_band: Option<f64>,
    lower_band: Option<f64>,
}

pub fn series_csv(series: &Series) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for p in series {
        let ind = p.indicators();
        wtr.serialize(SeriesRow {
            date: p.date().to_string(),
            label: p.label().to_string(),
            open: p.open(),
            high: p.high(),
            low: p.low(),
            close: p.close(),
            volume: p.volume(),
            sma5: ind.sma5(),
            sma10: ind.sma10(),
            sma20: ind.sma20(),
            sma50: ind.sma50(),
            sma200: ind.sma200(),
            rsi: ind.rsi,
            macd: ind.macd,
            signal: ind.signal,
            histogram: ind.histogram,
            upper_band: ind.upper_band,
            lower_band: ind.lower_band,
        })?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub fn series_table(series: &Series) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>8}",
        "Date", "Open", "High", "Low", "Close", "Volume", "SMA 20", "RSI", "MACD"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));
    for p in series {
        let ind = p.indicators();
        let _ = writeln!(
            out,
            "{:<8} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10} {:>10} {:>8} {:>8}",
            p.label(),
            p.open(),
            p.high(),
            p.low(),
            p.close(),
            format_volume(p.volume()),
            cell(ind.sma20()),
            cell(ind.rsi),
            cell(ind.macd),
        );
    }
    out
}

pub fn quote_text(quote: &StockInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", quote.name, quote.symbol);
    let _ = writeln!(
        out,
        "Price:      {}  {} ({}%)",
        format_price(quote.current_price),
        format_change(quote.change),
        format_change(quote.change_percent)
    );
    let _ = writeln!(out, "Open:       {}", format_price(quote.open));
    let _ = writeln!(out, "High:       {}", format_price(quote.high));
    let _ = writeln!(out, "Low:        {}", format_price(quote.low));
    let _ = writeln!(out, "Volume:     {}", format_volume(quote.volume));
    let _ = writeln!(out, "Market Cap: {}", quote.market_cap);
    let _ = writeln!(out, "P/E:        {}", format_number(quote.pe));
    let _ = writeln!(out, "Dividend:   {}%", format_number(quote.dividend));
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

pub fn analysis_text(analysis: &Analysis, warmup: usize, thresholds: &SummaryThresholds) -> String {
    let mut out = String::new();
    let report = &analysis.report;
    let summary = &report.summary;
    let request = &analysis.request;

    let _ = writeln!(
        out,
        "=== {} ({}) {} {} ===",
        analysis.quote.name, request.symbol, request.exchange, request.timeframe
    );
    if let (Some(first), Some(last)) = (report.series.first(), report.series.last()) {
        let _ = writeln!(
            out,
            "Period:         {} to {} ({} points, {} warmup)",
            first.date(),
            last.date(),
            report.series.len(),
            warmup
        );
        let _ = writeln!(out, "Last Price:     {}", format_price(last.price()));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "--- Summary ---");
    let _ = writeln!(out, "Trend:          {}", summary.trend);
    let _ = writeln!(out, "Strength:       {}", summary.strength);
    let _ = writeln!(out, "Support:        {}", format_price(summary.support));
    let _ = writeln!(out, "Resistance:     {}", format_price(summary.resistance));
    let _ = writeln!(out, "Recommendation: {}", summary.recommendation);
    let _ = writeln!(out);
    write_signals(&mut out, &report.signals, thresholds);
    out
}

fn write_signals(out: &mut String, signals: &TechnicalSignals, thresholds: &SummaryThresholds) {
    let ma = &signals.moving_averages;
    let _ = writeln!(out, "--- Moving Averages ---");
    let _ = writeln!(out, "Golden Cross:        {}", yes_no(ma.golden_cross));
    let _ = writeln!(out, "Death Cross:         {}", yes_no(ma.death_cross));
    let _ = writeln!(out, "Price above SMA 20:  {}", yes_no(ma.price_above_sma20));
    let _ = writeln!(out, "SMA 5 above SMA 20:  {}", yes_no(ma.short_term_momentum));
    let _ = writeln!(out);

    let rsi = &signals.rsi;
    let momentum = match rsi.momentum {
        MomentumBand::Strong => "strong",
        MomentumBand::Weak => "weak",
        MomentumBand::Neutral => "neutral",
    };
    let _ = writeln!(out, "--- RSI ---");
    let _ = writeln!(out, "Current:             {} ({momentum} momentum)", cell(rsi.value));
    let overbought = format!("Overbought (>{}):", thresholds.overbought);
    let oversold = format!("Oversold (<{}):", thresholds.oversold);
    let _ = writeln!(out, "{overbought:<21}{}", yes_no(rsi.overbought));
    let _ = writeln!(out, "{oversold:<21}{}", yes_no(rsi.oversold));
    let _ = writeln!(out, "Rising:              {}", yes_no(rsi.rising));
    let _ = writeln!(out);

    let macd = &signals.macd;
    let _ = writeln!(out, "--- MACD ---");
    let _ = writeln!(out, "MACD above signal:   {}", yes_no(macd.bullish));
    let _ = writeln!(out, "MACD above zero:     {}", yes_no(macd.above_zero));
    let _ = writeln!(out, "Histogram rising:    {}", yes_no(macd.histogram_rising));
    let _ = writeln!(out, "Recent crossover:    {}", yes_no(macd.recent_crossover));
    let _ = writeln!(out);

    let bb = &signals.bollinger;
    let width = match bb.width_trend {
        Some(BandWidthTrend::Contracting) => "contracting",
        Some(BandWidthTrend::Expanding) => "expanding",
        None => "-",
    };
    let _ = writeln!(out, "--- Bollinger Bands ---");
    let _ = writeln!(out, "Above upper band:    {}", yes_no(bb.above_upper));
    let _ = writeln!(out, "Below lower band:    {}", yes_no(bb.below_lower));
    let _ = writeln!(out, "Band width:          {width}");
    let _ = writeln!(out, "Upper half:          {}", yes_no(bb.upper_half));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockpulse_core::market::lookup;
    use stockpulse_core::{
        AnalysisConfig, AnalysisPipeline, AnalysisRequest, PricePoint, SeedHierarchy,
    };

    fn small_series() -> Series {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        Series::new(vec![PricePoint::new(d, 100.0, 102.5, 99.0, 101.25, 1_500_000)])
    }

    #[test]
    fn csv_has_header_and_empty_indicator_cells() {
        let csv = series_csv(&small_series()).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("date,label,open,high,low,close,volume,sma5"));
        assert!(header.ends_with("upper_band,lower_band"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("2024-03-05,05 Mar,100.0,102.5,99.0,101.25,1500000,"));
        assert!(row.ends_with(",,,,"));
    }

    #[test]
    fn table_shows_label_and_volume_unit() {
        let table = series_table(&small_series());
        assert!(table.contains("05 Mar"));
        assert!(table.contains("15.00 L"));
    }

    #[test]
    fn quote_text_formats_rupees() {
        let text = quote_text(&lookup("RELIANCE").unwrap());
        assert!(text.contains("Reliance Industries Ltd. (RELIANCE)"));
        assert!(text.contains("₹2550.75"));
    }

    #[test]
    fn analysis_text_lists_verdict() {
        let pipeline = AnalysisPipeline::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let analysis = pipeline
            .analyze_request(&AnalysisRequest::default(), &SeedHierarchy::new(1), today)
            .unwrap();
        let text = analysis_text(&analysis, pipeline.warmup(), pipeline.thresholds());
        assert!(text.contains("RELIANCE"));
        assert!(text.contains("Recommendation: "));
        assert!(text.contains("Recent crossover:"));
        assert!(text.contains("Overbought (>70):    "));
        assert!(text.contains("Oversold (<30):      "));
    }

    #[test]
    fn rsi_labels_follow_configured_thresholds() {
        let config = AnalysisConfig::from_toml("[summary]\noverbought = 80.0\noversold = 25.5\n")
            .unwrap();
        let pipeline = AnalysisPipeline::from_config(&config).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let analysis = pipeline
            .analyze_request(&AnalysisRequest::default(), &SeedHierarchy::new(1), today)
            .unwrap();
        let text = analysis_text(&analysis, pipeline.warmup(), pipeline.thresholds());
        assert!(text.contains("Overbought (>80):"));
        assert!(text.contains("Oversold (<25.5):"));
        assert!(!text.contains("(>70)"));
    }
}
