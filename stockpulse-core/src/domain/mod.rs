//! Domain types for StockPulse

pub mod price_point;
pub mod series;
pub mod summary;

pub use price_point::{Indicators, PointError, PricePoint, DATE_LABEL_FORMAT};
pub use series::Series;
pub use summary::{AnalysisSummary, Recommendation, Strength, Trend};
