//! Pipeline constants
//!
//! Staleness, pacing, lookback, and screener thresholds shared across the
//! scrape pipeline. Price values are full IDR (e.g. 9,075 for BBCA, not a
//! scaled short form), volumes are share counts.

/// Maximum age of an upstream quote timestamp before the quote is rejected
/// as stale and the next source is tried.
///
/// Age is measured in calendar days, so weekend and holiday closures count
/// toward it.
// TODO: a Friday close is 3 calendar days old on a Monday-morning run and
// gets rejected before the first tick of the session; decide whether the
// threshold should skip non-trading days.
pub const STALENESS_MAX_AGE_DAYS: i64 = 2;

/// Per-request timeout for every upstream adapter call.
pub const ADAPTER_TIMEOUT_SECS: u64 = 10;

/// Delay between consecutive symbols during a scrape run.
pub const SYMBOL_DELAY_MS: u64 = 500;

/// Number of symbols processed between the longer batch pauses.
pub const BATCH_SIZE: usize = 3;

/// Pause after each batch of symbols.
pub const BATCH_DELAY_SECS: u64 = 3;

/// Moving-average windows computed for every symbol with enough history.
pub const MA_SHORT: usize = 20;
pub const MA_MEDIUM: usize = 50;
pub const MA_LONG: usize = 200;

/// RSI lookback (one-bar deltas).
pub const RSI_PERIOD: usize = 14;

// Performance lookbacks, in sessions back from the latest bar. A week is
// five sessions (latest plus four back), a month 22, a quarter 66.
pub const PERF_SESSIONS_1D: usize = 1;
pub const PERF_SESSIONS_1W: usize = 4;
pub const PERF_SESSIONS_1M: usize = 21;
pub const PERF_SESSIONS_3M: usize = 65;

/// Daily history window fetched per symbol (1 year).
pub const DAILY_HISTORY_DAYS: i64 = 365;

/// Monthly history window fetched per symbol (5 years).
pub const MONTHLY_HISTORY_DAYS: i64 = 365 * 5;

// Screener bucket thresholds.
/// Trailing P/E below this is a value stock.
pub const SCREENER_VALUE_PE_MAX: f64 = 15.0;
/// Trailing P/E above this is a growth stock.
pub const SCREENER_GROWTH_PE_MIN: f64 = 20.0;
/// Market cap above this (10T IDR) is large cap.
pub const SCREENER_LARGE_CAP_MIN: f64 = 10_000_000_000_000.0;

/// Exchange timezone for last-update stamps and trading-hours checks.
pub const EXCHANGE_TZ: &str = "Asia/Jakarta";
