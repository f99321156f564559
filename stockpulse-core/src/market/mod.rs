//! Market selection: symbols, exchanges, timeframes.

pub mod catalog;
pub mod request;
pub mod timeframe;

pub use catalog::{known_symbols, lookup, stock_info, StockInfo};
pub use request::{AnalysisRequest, DEFAULT_SYMBOL};
pub use timeframe::{Exchange, ParseError, Timeframe};
