use crate::constants::{
    MA_LONG, MA_MEDIUM, MA_SHORT, PERF_SESSIONS_1D, PERF_SESSIONS_1M, PERF_SESSIONS_1W,
    PERF_SESSIONS_3M, RSI_PERIOD,
};
use crate::models::history::{closes, HistoricalBar};
use crate::models::indicators::{performance, performance_ytd, rsi, sma};
use serde::{Deserialize, Serialize};

/// Derived technical metrics for one symbol.
///
/// Recomputed wholesale from the daily bar series each run. Fields that
/// cannot be computed (not enough history) serialize as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Technicals {
    pub ma_20: Option<f64>,
    pub ma_50: Option<f64>,
    pub ma_200: Option<f64>,
    pub rsi_14: Option<f64>,
    pub perf_1d: Option<f64>,
    pub perf_1w: Option<f64>,
    pub perf_1m: Option<f64>,
    pub perf_3m: Option<f64>,
    pub perf_ytd: Option<f64>,
}

impl Technicals {
    /// Compute all metrics from an ordered daily bar series. `year` is the
    /// calendar year the YTD lookback is anchored to.
    pub fn from_daily_bars(bars: &[HistoricalBar], year: i32) -> Self {
        let closes = closes(bars);

        Self {
            ma_20: sma(&closes, MA_SHORT),
            ma_50: sma(&closes, MA_MEDIUM),
            ma_200: sma(&closes, MA_LONG),
            rsi_14: rsi(&closes, RSI_PERIOD),
            perf_1d: performance(&closes, PERF_SESSIONS_1D),
            perf_1w: performance(&closes, PERF_SESSIONS_1W),
            perf_1m: performance(&closes, PERF_SESSIONS_1M),
            perf_3m: performance(&closes, PERF_SESSIONS_3M),
            perf_ytd: performance_ytd(bars, year),
        }
    }
}
