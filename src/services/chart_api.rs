//! Direct Yahoo v8 chart API client.
//!
//! Primary quote source and the provider of daily/monthly bar history for
//! the enrichment stage. Yahoo has no official API; the response schema is
//! owned by the third party and deserialized defensively, and every request
//! carries a browser User-Agent or the endpoint rejects it.

use crate::constants::ADAPTER_TIMEOUT_SECS;
use crate::error::{AppError, Result};
use crate::models::indicators::round2;
use crate::models::{HistoricalBar, Quote, QuoteSource, SymbolInfo};
use crate::services::adapter::{FetchError, QuoteAdapter, QuoteFetch};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use isahc::{config::Configurable, AsyncReadResponseExt, HttpClient, Request};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

/// Quote metadata block of a chart response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub chart_previous_close: Option<f64>,
    pub regular_market_time: Option<i64>,
    pub regular_market_volume: Option<u64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteArrays>,
}

#[derive(Debug, Deserialize)]
struct QuoteArrays {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

pub struct ChartClient {
    client: HttpClient,
    base_url: String,
    user_agents: Vec<String>,
}

impl ChartClient {
    pub fn new() -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(ADAPTER_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create chart client: {}", e)))?;

        let user_agents = vec![
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0".to_string(),
        ];

        Ok(Self {
            client,
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            user_agents,
        })
    }

    fn user_agent(&self) -> &str {
        use rand::seq::SliceRandom;
        self.user_agents
            .choose(&mut rand::thread_rng())
            .unwrap_or(&self.user_agents[0])
    }

    async fn get_chart(&self, url: &str) -> std::result::Result<ChartData, FetchError> {
        let request = Request::get(url)
            .header("User-Agent", self.user_agent())
            .header("Accept", "application/json")
            .header("Cache-Control", "no-cache")
            .body(())
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let mut response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let parsed: ChartResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        if let Some(err) = parsed.chart.error {
            if err.code == "Not Found" {
                return Err(FetchError::NoData);
            }
            return Err(FetchError::Malformed(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        parsed
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or(FetchError::NoData)
    }

    /// Fetch the quote metadata block for a symbol.
    pub async fn fetch_meta(&self, symbol: &str) -> std::result::Result<ChartMeta, FetchError> {
        let url = format!("{}/{}", self.base_url, symbol);
        let data = self.get_chart(&url).await?;
        Ok(data.meta)
    }

    /// Fetch daily bars for a date range.
    pub async fn fetch_daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> std::result::Result<Vec<HistoricalBar>, FetchError> {
        self.fetch_history(symbol, start, end, "1d").await
    }

    /// Fetch monthly bars for a date range.
    pub async fn fetch_monthly_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> std::result::Result<Vec<HistoricalBar>, FetchError> {
        self.fetch_history(symbol, start, end, "1mo").await
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: &str,
    ) -> std::result::Result<Vec<HistoricalBar>, FetchError> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end
            .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
            .and_utc()
            .timestamp();

        let url = format!(
            "{}/{}?period1={}&period2={}&interval={}",
            self.base_url, symbol, period1, period2, interval
        );

        let data = self.get_chart(&url).await?;
        Self::parse_bars(data)
    }

    /// Turn the parallel timestamp/OHLCV arrays into ordered bars.
    fn parse_bars(data: ChartData) -> std::result::Result<Vec<HistoricalBar>, FetchError> {
        let timestamps = data.timestamp.ok_or(FetchError::MissingField("timestamp"))?;

        let quote = data
            .indicators
            .and_then(|ind| ind.quote.into_iter().next())
            .ok_or(FetchError::MissingField("indicators.quote"))?;

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| FetchError::Malformed(format!("invalid timestamp: {}", ts)))?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Non-trading days come back as all-null rows
            let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
                continue;
            };

            bars.push(HistoricalBar {
                date,
                open: round2(open),
                high: round2(high),
                low: round2(low),
                close: round2(close),
                volume: volume.unwrap_or(0),
            });
        }

        if bars.is_empty() {
            return Err(FetchError::NoData);
        }

        Ok(bars)
    }
}

#[async_trait]
impl QuoteAdapter for ChartClient {
    fn name(&self) -> &'static str {
        "yahoo_chart"
    }

    async fn fetch_quote(&self, info: &SymbolInfo) -> QuoteFetch {
        let meta = match self.fetch_meta(&info.symbol).await {
            Ok(meta) => meta,
            Err(e) => return QuoteFetch::Unavailable(e),
        };

        let Some(price) = meta.regular_market_price.filter(|p| *p > 0.0) else {
            return QuoteFetch::Unavailable(FetchError::MissingField("regularMarketPrice"));
        };

        let Some(previous_close) = meta
            .previous_close
            .or(meta.chart_previous_close)
            .filter(|p| *p > 0.0)
        else {
            return QuoteFetch::Unavailable(FetchError::MissingField("previousClose"));
        };

        let price = round2(price);
        let previous_close = round2(previous_close);
        let (change, change_percent) = Quote::change_parts(price, previous_close);

        let mut quote = Quote {
            symbol: info.symbol.clone(),
            name: info.name.clone(),
            price,
            previous_close,
            change,
            change_percent,
            volume: meta.regular_market_volume.unwrap_or(0),
            day_high: meta.regular_market_day_high.map(round2).unwrap_or(0.0),
            day_low: meta.regular_market_day_low.map(round2).unwrap_or(0.0),
            fifty_two_week_high: meta.fifty_two_week_high.map(round2).unwrap_or(0.0),
            fifty_two_week_low: meta.fifty_two_week_low.map(round2).unwrap_or(0.0),
            // not exposed by this endpoint; filled by other sources when available
            market_cap: 0.0,
            source: QuoteSource::ChartApi,
            as_of: None,
            last_update: "Unknown".to_string(),
        };

        if let Some(ts) = meta.regular_market_time {
            if let Some(observed) = DateTime::from_timestamp(ts, 0) {
                quote.set_observed(observed);
            }
        }

        QuoteFetch::Fetched(quote)
    }
}
