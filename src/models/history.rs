use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading-day (or month, for long-range samples) OHLCV bar.
///
/// Serialized with PascalCase keys (`Date`, `Open`, ...) — the wire format
/// of the historical JSON documents. Bars are ordered by date ascending.
/// Upstream sources occasionally emit bars violating high >= max(open,
/// close); those are passed through as-is, they indicate a bad source, not
/// a local bug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoricalBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Extract the close series from an ordered bar sequence.
pub fn closes(bars: &[HistoricalBar]) -> Vec<f64> {
    bars.iter().map(|bar| bar.close).collect()
}
