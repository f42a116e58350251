use crate::models::fundamentals::{CompanyProfile, FinancialReports, Fundamentals};
use crate::models::history::HistoricalBar;
use crate::models::quote::Quote;
use crate::models::technicals::Technicals;
use serde::{Deserialize, Serialize};

/// The `basic` block of a per-symbol document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub name: String,
    pub price: f64,
    pub previous_close: f64,
    pub day_change: f64,
    pub day_change_percent: f64,
    pub volume: u64,
    pub avg_volume: Option<u64>,
    pub day_high: f64,
    pub day_low: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub market_cap: f64,
    pub shares_outstanding: Option<u64>,
    pub beta: Option<f64>,
    pub currency: String,
}

impl BasicInfo {
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            name: quote.name.clone(),
            price: quote.price,
            previous_close: quote.previous_close,
            day_change: quote.change,
            day_change_percent: quote.change_percent,
            volume: quote.volume,
            avg_volume: None,
            day_high: quote.day_high,
            day_low: quote.day_low,
            fifty_two_week_high: quote.fifty_two_week_high,
            fifty_two_week_low: quote.fifty_two_week_low,
            market_cap: quote.market_cap,
            shares_outstanding: None,
            beta: None,
            currency: "IDR".to_string(),
        }
    }
}

/// Daily (1y) and monthly (5y) bar series for one symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub daily: Vec<HistoricalBar>,
    pub monthly: Vec<HistoricalBar>,
}

/// Per-symbol document: everything known about one listing after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDetail {
    pub symbol: String,
    pub basic: BasicInfo,
    pub fundamentals: Fundamentals,
    pub technicals: Technicals,
    pub company: CompanyProfile,
    pub financials: FinancialReports,
    pub historical: HistoricalSeries,
    #[serde(rename = "lastUpdate")]
    pub last_update: String,
}
