//! Quote derived from recent daily bars.
//!
//! Third source in the fallback chain: when neither live quote endpoint
//! answers, the last two daily closes of a one-week chart window still give
//! a usable price/previous-close pair. Day range comes from the latest bar
//! and the 52-week figures degrade to the window extremes.

use crate::models::indicators::round2;
use crate::models::{Quote, QuoteSource, SymbolInfo};
use crate::services::adapter::{FetchError, QuoteAdapter, QuoteFetch};
use crate::services::chart_api::ChartClient;
use async_trait::async_trait;
use chrono::{Duration, NaiveTime, Utc};
use std::sync::Arc;

const WINDOW_DAYS: i64 = 7;

pub struct HistoryQuoteAdapter {
    chart: Arc<ChartClient>,
}

impl HistoryQuoteAdapter {
    pub fn new(chart: Arc<ChartClient>) -> Self {
        Self { chart }
    }
}

#[async_trait]
impl QuoteAdapter for HistoryQuoteAdapter {
    fn name(&self) -> &'static str {
        "recent_history"
    }

    async fn fetch_quote(&self, info: &SymbolInfo) -> QuoteFetch {
        let end = Utc::now().date_naive();
        let start = end - Duration::days(WINDOW_DAYS);

        let bars = match self.chart.fetch_daily_history(&info.symbol, start, end).await {
            Ok(bars) => bars,
            Err(e) => return QuoteFetch::Unavailable(e),
        };

        if bars.len() < 2 {
            return QuoteFetch::Unavailable(FetchError::NoData);
        }

        let latest = &bars[bars.len() - 1];
        let previous = &bars[bars.len() - 2];

        if latest.close <= 0.0 || previous.close <= 0.0 {
            return QuoteFetch::Unavailable(FetchError::MissingField("close"));
        }

        let price = round2(latest.close);
        let previous_close = round2(previous.close);
        let (change, change_percent) = Quote::change_parts(price, previous_close);

        let window_high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let window_low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        let mut quote = Quote {
            symbol: info.symbol.clone(),
            name: info.name.clone(),
            price,
            previous_close,
            change,
            change_percent,
            volume: latest.volume,
            day_high: latest.high,
            day_low: latest.low,
            fifty_two_week_high: round2(window_high),
            fifty_two_week_low: round2(window_low),
            market_cap: 0.0,
            source: QuoteSource::RecentHistory,
            as_of: None,
            last_update: "Unknown".to_string(),
        };

        // The bar carries only a date; midnight UTC is the best observation
        // stamp available, and the freshness check runs against it.
        quote.set_observed(latest.date.and_time(NaiveTime::MIN).and_utc());

        QuoteFetch::Fetched(quote)
    }
}
