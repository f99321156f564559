//! StockPulse CLI: mock market series, technical analysis and quotes.
//!
//! Commands:
//! - `series`: generate an annotated mock series as a table, JSON or CSV
//! - `analyze`: run the indicator pipeline and print the verdict and signals
//! - `quote`: show the quote for a symbol
//! - `symbols`: list the symbols with fixed quotes
//! - `config`: print the default analysis config as TOML

mod output;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use stockpulse_core::market::{known_symbols, lookup, stock_info, DEFAULT_SYMBOL};
use stockpulse_core::{
    AnalysisConfig, AnalysisPipeline, AnalysisRequest, Exchange, SeedHierarchy, Timeframe,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 42;

#[derive(Parser)]
#[command(
    name = "stockpulse",
    version,
    about = "StockPulse CLI: mock Indian-market data and technical analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an annotated mock price series.
    Series {
        #[command(flatten)]
        request: RequestArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = SeriesFormat::Table)]
        format: SeriesFormat,
    },
    /// Run the indicator pipeline and print the summary verdict and signals.
    Analyze {
        #[command(flatten)]
        request: RequestArgs,

        /// Path to an analysis config TOML file. Defaults to built-in settings.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Show the quote for a symbol.
    Quote {
        /// Ticker symbol (e.g., RELIANCE, TCS).
        #[arg(long, default_value = DEFAULT_SYMBOL)]
        symbol: String,

        /// Master seed for fabricated quotes.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// List the symbols with fixed quotes.
    Symbols,
    /// Print the default analysis config as TOML.
    Config,
}

#[derive(Args, Debug, Clone)]
struct RequestArgs {
    /// Ticker symbol (e.g., RELIANCE, TCS).
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Exchange: NSE or BSE.
    #[arg(long, default_value = "NSE")]
    exchange: Exchange,

    /// Timeframe: 1d, 1w, 1mo, 3mo, 6mo, 1y, 5y.
    #[arg(long, default_value = "1mo")]
    timeframe: Timeframe,

    /// Master seed. The same seed and request always yield the same series.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Last date of the series (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl RequestArgs {
    fn request(&self) -> AnalysisRequest {
        AnalysisRequest::new(self.symbol.as_str(), self.exchange, self.timeframe)
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SeriesFormat {
    Table,
    Json,
    Csv,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Series { request, format } => run_series(&request, format),
        Commands::Analyze {
            request,
            config,
            format,
        } => run_analyze(&request, config.as_deref(), format),
        Commands::Quote {
            symbol,
            seed,
            format,
        } => run_quote(&symbol, seed, format),
        Commands::Symbols => run_symbols(),
        Commands::Config => run_config(),
    }
}

fn load_pipeline(config_path: Option<&Path>) -> Result<AnalysisPipeline> {
    let config = match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading analysis config");
            AnalysisConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };
    Ok(AnalysisPipeline::from_config(&config)?)
}

fn run_series(args: &RequestArgs, format: SeriesFormat) -> Result<()> {
    let pipeline = AnalysisPipeline::default();
    let request = args.request();
    let analysis = pipeline
        .analyze_request(&request, &SeedHierarchy::new(args.seed), args.today())
        .with_context(|| format!("failed to generate series for {}", request.symbol))?;
    let series = &analysis.report.series;

    let out = match format {
        SeriesFormat::Table => output::series_table(series),
        SeriesFormat::Json => serde_json::to_string_pretty(series)?,
        SeriesFormat::Csv => output::series_csv(series)?,
    };
    print!("{out}");
    if format == SeriesFormat::Json {
        println!();
    }
    Ok(())
}

fn run_analyze(args: &RequestArgs, config: Option<&Path>, format: ReportFormat) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let request = args.request();
    let analysis = pipeline
        .analyze_request(&request, &SeedHierarchy::new(args.seed), args.today())
        .with_context(|| format!("failed to analyze {}", request.symbol))?;

    match format {
        ReportFormat::Text => print!(
            "{}",
            output::analysis_text(&analysis, pipeline.warmup(), pipeline.thresholds())
        ),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }
    Ok(())
}

fn run_quote(symbol: &str, seed: u64, format: ReportFormat) -> Result<()> {
    let request = AnalysisRequest::new(symbol, Exchange::default(), Timeframe::default());
    let mut rng = SeedHierarchy::new(seed).rng_for(&request);
    let quote = stock_info(&request.symbol, &mut rng);
    if lookup(&request.symbol).is_none() {
        info!(symbol = %request.symbol, "no fixed quote, fabricating one");
    }

    match format {
        ReportFormat::Text => print!("{}", output::quote_text(&quote)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&quote)?),
    }
    Ok(())
}

fn run_symbols() -> Result<()> {
    println!("{:<12} {:<32} {:>12}", "Symbol", "Name", "Price");
    println!("{}", "-".repeat(58));
    for symbol in known_symbols() {
        if let Some(info) = lookup(symbol) {
            println!(
                "{:<12} {:<32} {:>12}",
                info.symbol,
                info.name,
                stockpulse_core::format::format_price(info.current_price)
            );
        }
    }
    Ok(())
}

fn run_config() -> Result<()> {
    let text = AnalysisConfig::default()
        .to_toml()
        .context("failed to serialize default config")?;
    print!("{text}");
    Ok(())
}
