//! Quote catalog for the tracked large-cap symbols.
//!
//! Known symbols carry fixed quotes. Any other symbol gets a fabricated quote
//! drawn from the caller's RNG, so a seeded RNG yields a stable quote.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Quote metadata shown alongside a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub market_cap: String,
    pub pe: f64,
    pub dividend: f64,
}

struct Listing {
    symbol: &'static str,
    name: &'static str,
    current_price: f64,
    change: f64,
    change_percent: f64,
    open: f64,
    high: f64,
    low: f64,
    volume: u64,
    market_cap: &'static str,
    pe: f64,
    dividend: f64,
}

const LISTINGS: [Listing; 8] = [
    Listing {
        symbol: "RELIANCE",
        name: "Reliance Industries Ltd.",
        current_price: 2550.75,
        change: 45.25,
        change_percent: 1.8,
        open: 2505.50,
        high: 2570.25,
        low: 2490.00,
        volume: 7_865_432,
        market_cap: "₹17.2T",
        pe: 28.4,
        dividend: 2.5,
    },
    Listing {
        symbol: "TCS",
        name: "Tata Consultancy Services Ltd.",
        current_price: 3450.20,
        change: -12.35,
        change_percent: -0.36,
        open: 3462.55,
        high: 3478.90,
        low: 3442.10,
        volume: 2_345_678,
        market_cap: "₹12.6T",
        pe: 32.1,
        dividend: 3.2,
    },
    Listing {
        symbol: "INFY",
        name: "Infosys Ltd.",
        current_price: 1456.10,
        change: -3.45,
        change_percent: -0.24,
        open: 1459.55,
        high: 1467.20,
        low: 1451.85,
        volume: 3_210_987,
        market_cap: "₹6.1T",
        pe: 24.6,
        dividend: 2.8,
    },
    Listing {
        symbol: "HDFCBANK",
        name: "HDFC Bank Ltd.",
        current_price: 1623.50,
        change: 12.75,
        change_percent: 0.79,
        open: 1610.75,
        high: 1625.90,
        low: 1608.25,
        volume: 4_532_109,
        market_cap: "₹9.3T",
        pe: 22.8,
        dividend: 1.8,
    },
    Listing {
        symbol: "SBIN",
        name: "State Bank of India",
        current_price: 527.80,
        change: 3.25,
        change_percent: 0.62,
        open: 524.55,
        high: 530.10,
        low: 523.45,
        volume: 9_876_543,
        market_cap: "₹4.7T",
        pe: 9.7,
        dividend: 3.5,
    },
    Listing {
        symbol: "BHARTIARTL",
        name: "Bharti Airtel Ltd.",
        current_price: 875.60,
        change: -5.40,
        change_percent: -0.61,
        open: 881.00,
        high: 883.75,
        low: 873.20,
        volume: 3_456_789,
        market_cap: "₹5.2T",
        pe: 35.2,
        dividend: 1.2,
    },
    Listing {
        symbol: "HINDUNILVR",
        name: "Hindustan Unilever Ltd.",
        current_price: 2311.25,
        change: 15.75,
        change_percent: 0.69,
        open: 2295.50,
        high: 2318.80,
        low: 2293.15,
        volume: 1_234_567,
        market_cap: "₹5.5T",
        pe: 67.5,
        dividend: 2.1,
    },
    Listing {
        symbol: "ICICIBANK",
        name: "ICICI Bank Ltd.",
        current_price: 942.30,
        change: 8.45,
        change_percent: 0.90,
        open: 933.85,
        high: 945.70,
        low: 932.50,
        volume: 5_678_901,
        market_cap: "₹6.7T",
        pe: 19.3,
        dividend: 1.5,
    },
];

impl Listing {
    fn to_info(&self) -> StockInfo {
        StockInfo {
            symbol: self.symbol.to_string(),
            name: self.name.to_string(),
            current_price: self.current_price,
            change: self.change,
            change_percent: self.change_percent,
            open: self.open,
            high: self.high,
            low: self.low,
            volume: self.volume,
            market_cap: self.market_cap.to_string(),
            pe: self.pe,
            dividend: self.dividend,
        }
    }
}

/// Symbols with fixed quotes, in display order.
pub fn known_symbols() -> Vec<&'static str> {
    LISTINGS.iter().map(|l| l.symbol).collect()
}

/// Fixed quote for a known symbol (case-insensitive).
pub fn lookup(symbol: &str) -> Option<StockInfo> {
    LISTINGS
        .iter()
        .find(|l| l.symbol.eq_ignore_ascii_case(symbol.trim()))
        .map(Listing::to_info)
}

/// Quote for any symbol: the fixed one when known, fabricated otherwise.
pub fn stock_info<R: Rng>(symbol: &str, rng: &mut R) -> StockInfo {
    lookup(symbol).unwrap_or_else(|| fabricate(symbol, rng))
}

fn fabricate<R: Rng>(symbol: &str, rng: &mut R) -> StockInfo {
    let symbol = symbol.trim().to_ascii_uppercase();
    StockInfo {
        name: format!("{symbol} Stock"),
        symbol,
        current_price: 1500.0 + rng.gen::<f64>() * 1000.0,
        change: (rng.gen::<f64>() - 0.5) * 50.0,
        change_percent: (rng.gen::<f64>() - 0.5) * 4.0,
        open: 1500.0 + rng.gen::<f64>() * 1000.0,
        high: 1550.0 + rng.gen::<f64>() * 1000.0,
        low: 1450.0 + rng.gen::<f64>() * 1000.0,
        volume: (1_000_000.0 + rng.gen::<f64>() * 10_000_000.0).floor() as u64,
        market_cap: format!("₹{:.1}T", rng.gen::<f64>() * 10.0),
        pe: 15.0 + rng.gen::<f64>() * 25.0,
        dividend: rng.gen::<f64>() * 4.0,
    }
}
