//! Yahoo v10 quoteSummary client.
//!
//! Second quote source in the fallback chain and the provider of
//! fundamentals, company profile, and report headline figures during
//! enrichment. Numeric values arrive wrapped as `{"raw": ..., "fmt": ...}`
//! objects; only `raw` is read.

use crate::constants::ADAPTER_TIMEOUT_SECS;
use crate::error::{AppError, Result};
use crate::models::indicators::{normalize, round2};
use crate::models::{CompanyProfile, FinancialReports, Fundamentals, Quote, QuoteSource, SymbolInfo};
use crate::services::adapter::{FetchError, QuoteAdapter, QuoteFetch};
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

const QUOTE_MODULES: &str = "price,summaryDetail";
const PROFILE_MODULES: &str = "summaryDetail,defaultKeyStatistics,financialData,assetProfile";

/// Numeric wrapper used throughout quoteSummary payloads.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawNum {
    pub raw: Option<f64>,
}

fn raw(value: &Option<RawNum>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

/// `raw` rounded to 2 decimals, non-finite normalized away.
fn raw2(value: &Option<RawNum>) -> Option<f64> {
    raw(value).and_then(normalize)
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryEnvelope,
}

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    result: Option<Vec<SummaryResult>>,
    error: Option<SummaryError>,
}

#[derive(Debug, Deserialize)]
struct SummaryError {
    code: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetailModule>,
    default_key_statistics: Option<KeyStatsModule>,
    financial_data: Option<FinancialDataModule>,
    asset_profile: Option<AssetProfileModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    regular_market_price: Option<RawNum>,
    regular_market_previous_close: Option<RawNum>,
    regular_market_volume: Option<RawNum>,
    regular_market_day_high: Option<RawNum>,
    regular_market_day_low: Option<RawNum>,
    regular_market_time: Option<i64>,
    market_cap: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    previous_close: Option<RawNum>,
    fifty_two_week_high: Option<RawNum>,
    fifty_two_week_low: Option<RawNum>,
    trailing_pe: Option<RawNum>,
    forward_pe: Option<RawNum>,
    price_to_sales_trailing12_months: Option<RawNum>,
    dividend_yield: Option<RawNum>,
    dividend_rate: Option<RawNum>,
    payout_ratio: Option<RawNum>,
    average_volume: Option<RawNum>,
    beta: Option<RawNum>,
    market_cap: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatsModule {
    trailing_eps: Option<RawNum>,
    forward_eps: Option<RawNum>,
    price_to_book: Option<RawNum>,
    peg_ratio: Option<RawNum>,
    book_value: Option<RawNum>,
    shares_outstanding: Option<RawNum>,
    net_income_to_common: Option<RawNum>,
    enterprise_value: Option<RawNum>,
    enterprise_to_revenue: Option<RawNum>,
    enterprise_to_ebitda: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    return_on_equity: Option<RawNum>,
    return_on_assets: Option<RawNum>,
    gross_margins: Option<RawNum>,
    operating_margins: Option<RawNum>,
    profit_margins: Option<RawNum>,
    debt_to_equity: Option<RawNum>,
    current_ratio: Option<RawNum>,
    quick_ratio: Option<RawNum>,
    revenue_per_share: Option<RawNum>,
    total_cash_per_share: Option<RawNum>,
    total_revenue: Option<RawNum>,
    operating_cashflow: Option<RawNum>,
    free_cashflow: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetProfileModule {
    sector: Option<String>,
    industry: Option<String>,
    website: Option<String>,
    long_business_summary: Option<String>,
    country: Option<String>,
    city: Option<String>,
    address1: Option<String>,
    full_time_employees: Option<u64>,
}

/// Enrichment payload assembled from the profile modules.
#[derive(Debug, Default)]
pub struct SymbolProfile {
    pub fundamentals: Fundamentals,
    pub company: CompanyProfile,
    pub financials: FinancialReports,
    pub shares_outstanding: Option<u64>,
    pub average_volume: Option<u64>,
    pub beta: Option<f64>,
    pub market_cap: Option<f64>,
}

pub struct QuoteSummaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl QuoteSummaryClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(ADAPTER_TIMEOUT_SECS))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create summary client: {}", e)))?;

        Ok(Self {
            client,
            base_url: "https://query2.finance.yahoo.com/v10/finance/quoteSummary".to_string(),
        })
    }

    async fn fetch_modules(
        &self,
        symbol: &str,
        modules: &str,
    ) -> std::result::Result<SummaryResult, FetchError> {
        let url = format!("{}/{}?modules={}", self.base_url, symbol, modules);
        debug!(symbol, modules, "Fetching quote summary");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let parsed: SummaryResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        if let Some(err) = parsed.quote_summary.error {
            return Err(FetchError::Malformed(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        parsed
            .quote_summary
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

    /// Fetch fundamentals, company profile, and report headline figures.
    pub async fn fetch_profile(
        &self,
        symbol: &str,
    ) -> std::result::Result<SymbolProfile, FetchError> {
        let result = self.fetch_modules(symbol, PROFILE_MODULES).await?;

        let detail = result.summary_detail.unwrap_or_default();
        let stats = result.default_key_statistics.unwrap_or_default();
        let financial = result.financial_data.unwrap_or_default();
        let profile = result.asset_profile.unwrap_or_default();

        let fundamentals = Fundamentals {
            pe: raw2(&detail.trailing_pe),
            forward_pe: raw2(&detail.forward_pe),
            peg: raw2(&stats.peg_ratio),
            pb: raw2(&stats.price_to_book),
            ps: raw2(&detail.price_to_sales_trailing12_months),
            eps: raw2(&stats.trailing_eps),
            forward_eps: raw2(&stats.forward_eps),
            dividend_yield: raw(&detail.dividend_yield).and_then(|y| normalize(y * 100.0)),
            dividend_rate: raw2(&detail.dividend_rate),
            payout_ratio: raw2(&detail.payout_ratio),
            roe: raw2(&financial.return_on_equity),
            roa: raw2(&financial.return_on_assets),
            gross_margin: raw2(&financial.gross_margins),
            operating_margin: raw2(&financial.operating_margins),
            profit_margin: raw2(&financial.profit_margins),
            debt_to_equity: raw2(&financial.debt_to_equity),
            current_ratio: raw2(&financial.current_ratio),
            quick_ratio: raw2(&financial.quick_ratio),
            book_value: raw2(&stats.book_value),
            revenue_per_share: raw2(&financial.revenue_per_share),
            total_cash_per_share: raw2(&financial.total_cash_per_share),
            enterprise_value: raw2(&stats.enterprise_value),
            ev_to_revenue: raw2(&stats.enterprise_to_revenue),
            ev_to_ebitda: raw2(&stats.enterprise_to_ebitda),
        };

        let company = CompanyProfile {
            sector: profile.sector,
            industry: profile.industry,
            full_time_employees: profile.full_time_employees,
            website: profile.website,
            description: profile.long_business_summary,
            country: profile.country,
            city: profile.city,
            address: profile.address1,
        };

        // Balance-sheet totals are not exposed by these modules; they stay
        // null rather than being guessed.
        let financials = FinancialReports {
            revenue: raw2(&financial.total_revenue),
            net_income: raw2(&stats.net_income_to_common),
            total_assets: None,
            total_liabilities: None,
            total_equity: None,
            operating_cash_flow: raw2(&financial.operating_cashflow),
            free_cash_flow: raw2(&financial.free_cashflow),
        };

        Ok(SymbolProfile {
            fundamentals,
            company,
            financials,
            shares_outstanding: raw(&stats.shares_outstanding).map(|v| v as u64),
            average_volume: raw(&detail.average_volume).map(|v| v as u64),
            beta: raw2(&detail.beta),
            market_cap: raw(&detail.market_cap),
        })
    }
}

#[async_trait]
impl QuoteAdapter for QuoteSummaryClient {
    fn name(&self) -> &'static str {
        "quote_summary"
    }

    async fn fetch_quote(&self, info: &SymbolInfo) -> QuoteFetch {
        let result = match self.fetch_modules(&info.symbol, QUOTE_MODULES).await {
            Ok(result) => result,
            Err(e) => return QuoteFetch::Unavailable(e),
        };

        let price_module = result.price.unwrap_or_default();
        let detail = result.summary_detail.unwrap_or_default();

        let Some(price) = raw(&price_module.regular_market_price).filter(|p| *p > 0.0) else {
            return QuoteFetch::Unavailable(FetchError::MissingField("price.regularMarketPrice"));
        };

        let Some(previous_close) = raw(&price_module.regular_market_previous_close)
            .or(raw(&detail.previous_close))
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
            volume: raw(&price_module.regular_market_volume).map(|v| v as u64).unwrap_or(0),
            day_high: raw2(&price_module.regular_market_day_high).unwrap_or(0.0),
            day_low: raw2(&price_module.regular_market_day_low).unwrap_or(0.0),
            fifty_two_week_high: raw2(&detail.fifty_two_week_high).unwrap_or(0.0),
            fifty_two_week_low: raw2(&detail.fifty_two_week_low).unwrap_or(0.0),
            market_cap: raw(&price_module.market_cap)
                .or(raw(&detail.market_cap))
                .unwrap_or(0.0),
            source: QuoteSource::QuoteSummary,
            as_of: None,
            last_update: "Unknown".to_string(),
        };

        if let Some(ts) = price_module.regular_market_time {
            if let Some(observed) = DateTime::from_timestamp(ts, 0) {
                quote.set_observed(observed);
            }
        }

        QuoteFetch::Fetched(quote)
    }
}
