use crate::models::indicators::round2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used for synthetic quotes in place of an observation timestamp.
pub const ESTIMATED_LABEL: &str = "Estimated (upstream sources unavailable)";

/// Which upstream produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    ChartApi,
    QuoteSummary,
    RecentHistory,
    Synthetic,
}

impl QuoteSource {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteSource::ChartApi => "Yahoo Chart API",
            QuoteSource::QuoteSummary => "Yahoo Quote Summary",
            QuoteSource::RecentHistory => "Recent History",
            QuoteSource::Synthetic => "Realistic Estimate",
        }
    }

    /// True for quotes backed by an actual upstream observation.
    pub fn is_real(&self) -> bool {
        !matches!(self, QuoteSource::Synthetic)
    }
}

/// Point-in-time price/volume snapshot for one symbol.
///
/// Exactly one Quote is current per symbol per scrape run; the next run
/// replaces it wholesale. `change` and `change_percent` are always derived
/// from `price` and `previous_close` via [`Quote::change_parts`], so the
/// published numbers agree with each other within rounding — for synthetic
/// records too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    /// Last traded price, full IDR.
    pub price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub day_high: f64,
    pub day_low: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub market_cap: f64,
    pub source: QuoteSource,
    /// Upstream observation time; `None` for synthetic quotes and for
    /// sources that omit the stamp.
    #[serde(skip)]
    pub as_of: Option<DateTime<Utc>>,
    /// Human-readable observation time, or the estimate label.
    pub last_update: String,
}

impl Quote {
    /// Derive (change, change-percent) from a price pair, rounded to 2
    /// decimal places. A zero previous close yields zero change-percent.
    pub fn change_parts(price: f64, previous_close: f64) -> (f64, f64) {
        let change = price - previous_close;
        let change_percent = if previous_close != 0.0 {
            round2(change / previous_close * 100.0)
        } else {
            0.0
        };
        (round2(change), change_percent)
    }

    /// Record the upstream observation time and its display form.
    pub fn set_observed(&mut self, as_of: DateTime<Utc>) {
        self.as_of = Some(as_of);
        self.last_update = as_of.format("%Y-%m-%d %H:%M:%S").to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_change_parts_invariant() {
        let (change, change_percent) = Quote::change_parts(9075.0, 9000.0);
        assert_eq!(change, 75.0);
        // 75/9000 * 100 = 0.8333.. -> 0.83
        assert_eq!(change_percent, 0.83);
    }

    #[test]
    fn test_change_parts_negative() {
        let (change, change_percent) = Quote::change_parts(103.0, 105.0);
        assert_eq!(change, -2.0);
        assert_eq!(change_percent, -1.9);
    }

    #[test]
    fn test_change_parts_zero_previous_close() {
        let (change, change_percent) = Quote::change_parts(100.0, 0.0);
        assert_eq!(change, 100.0);
        assert_eq!(change_percent, 0.0);
    }

    #[test]
    fn test_set_observed_formats_stamp() {
        let mut quote = Quote {
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
            source: QuoteSource::ChartApi,
            as_of: None,
            last_update: "Unknown".to_string(),
        };

        let ts = Utc.with_ymd_and_hms(2026, 8, 3, 9, 30, 0).unwrap();
        quote.set_observed(ts);
        assert_eq!(quote.as_of, Some(ts));
        assert_eq!(quote.last_update, "2026-08-03 09:30:00");
    }

    #[test]
    fn test_serializes_camel_case() {
        let quote = Quote {
            symbol: "TLKM.JK".to_string(),
            name: "Telkom Indonesia".to_string(),
            price: 3200.0,
            previous_close: 3150.0,
            change: 50.0,
            change_percent: 1.59,
            volume: 8_000_000,
            day_high: 3225.0,
            day_low: 3140.0,
            fifty_two_week_high: 4100.0,
            fifty_two_week_low: 2600.0,
            market_cap: 3.2e14,
            source: QuoteSource::Synthetic,
            as_of: None,
            last_update: ESTIMATED_LABEL.to_string(),
        };

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["changePercent"], 1.59);
        assert_eq!(json["fiftyTwoWeekHigh"], 4100.0);
        assert_eq!(json["source"], "synthetic");
        assert_eq!(json["lastUpdate"], ESTIMATED_LABEL);
    }
}
