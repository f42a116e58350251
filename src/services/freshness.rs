//! Quote freshness validation.
//!
//! Pure check applied by the orchestrator to every real-source quote before
//! accepting it. Synthetic quotes carry no observation timestamp and are
//! exempt, as are sources that omit the stamp entirely.

use crate::constants::STALENESS_MAX_AGE_DAYS;
use crate::models::Quote;
use crate::services::adapter::FetchError;
use chrono::{DateTime, Duration, Utc};

/// Age of an observation relative to `now`.
pub fn quote_age(as_of: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    now - as_of
}

/// Reject a quote whose observation timestamp exceeds the staleness
/// threshold. Quotes without a timestamp pass unchecked.
pub fn check_freshness(quote: &Quote, now: DateTime<Utc>) -> Result<(), FetchError> {
    let Some(as_of) = quote.as_of else {
        return Ok(());
    };

    let age = quote_age(as_of, now);
    if age > Duration::days(STALENESS_MAX_AGE_DAYS) {
        return Err(FetchError::Stale {
            age_days: age.num_days(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuoteSource, ESTIMATED_LABEL};
    use chrono::TimeZone;

    fn quote_observed_at(as_of: Option<DateTime<Utc>>) -> Quote {
        Quote {
            symbol: "BBCA.JK".to_string(),
            name: "Bank Central Asia".to_string(),
            price: 9075.0,
            previous_close: 9000.0,
            change: 75.0,
            change_percent: 0.83,
            volume: 12_000_000,
            day_high: 9100.0,
            day_low: 8990.0,
            fifty_two_week_high: 10_000.0,
            fifty_two_week_low: 8000.0,
            market_cap: 0.0,
            source: if as_of.is_some() {
                QuoteSource::ChartApi
            } else {
                QuoteSource::Synthetic
            },
            as_of,
            last_update: ESTIMATED_LABEL.to_string(),
        }
    }

    #[test]
    fn test_fresh_quote_accepted() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let quote = quote_observed_at(Some(now - Duration::hours(6)));
        assert!(check_freshness(&quote, now).is_ok());
    }

    #[test]
    fn test_stale_quote_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let quote = quote_observed_at(Some(now - Duration::days(3)));
        let err = check_freshness(&quote, now).unwrap_err();
        assert!(matches!(err, FetchError::Stale { age_days: 3 }));
    }

    #[test]
    fn test_exactly_at_threshold_accepted() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let quote = quote_observed_at(Some(now - Duration::days(STALENESS_MAX_AGE_DAYS)));
        assert!(check_freshness(&quote, now).is_ok());
    }

    #[test]
    fn test_missing_timestamp_passes() {
        let now = Utc::now();
        let quote = quote_observed_at(None);
        assert!(check_freshness(&quote, now).is_ok());
    }

    // A Friday 16:00 close is rejected on a Monday 17:00 run: calendar age
    // exceeds 2 days even though only one session elapsed. Documents the
    // weekend gap in the threshold (see constants::STALENESS_MAX_AGE_DAYS).
    #[test]
    fn test_friday_close_rejected_monday_evening() {
        let friday_close = Utc.with_ymd_and_hms(2026, 7, 31, 9, 0, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap();
        let quote = quote_observed_at(Some(friday_close));
        assert!(check_freshness(&quote, monday).is_err());
    }
}
