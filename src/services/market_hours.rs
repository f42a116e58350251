use crate::constants::EXCHANGE_TZ;
use chrono::{Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use std::time::Duration;

/// Trading hours configuration for the Jakarta exchange
pub struct TradingHours {
    pub start_hour: u32,        // 9 for 9am WIB
    pub end_hour: u32,          // 16 for 4pm WIB
    pub timezone: &'static str, // "Asia/Jakarta"
    pub weekdays_only: bool,
}

impl Default for TradingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 16,
            timezone: EXCHANGE_TZ,
            weekdays_only: true,
        }
    }
}

/// Check if current time is within IDX trading hours
pub fn is_trading_hours() -> bool {
    let config = TradingHours::default();

    let tz: Tz = match config.timezone.parse() {
        Ok(tz) => tz,
        Err(e) => {
            tracing::warn!("Failed to parse timezone '{}': {}", config.timezone, e);
            return false; // Default to non-trading hours if timezone parsing fails
        }
    };

    let now_local = Utc::now().with_timezone(&tz);

    if config.weekdays_only {
        match now_local.weekday() {
            Weekday::Sat | Weekday::Sun => return false,
            _ => {}
        }
    }

    let current_hour = now_local.hour();
    current_hour >= config.start_hour && current_hour < config.end_hour
}

/// Get the appropriate refresh interval based on trading hours
pub fn refresh_interval(trading_interval: Duration, non_trading_interval: Duration) -> Duration {
    if is_trading_hours() {
        trading_interval
    } else {
        non_trading_interval
    }
}

/// Current time formatted in exchange-local time for last-update stamps
/// (e.g. "2026-08-06 14:05:12 WIB").
pub fn exchange_now_string() -> String {
    match EXCHANGE_TZ.parse::<Tz>() {
        Ok(tz) => Utc::now()
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        Err(_) => Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}
