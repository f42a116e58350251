use crate::models::indicators::round2;
use crate::models::quote::Quote;
use serde::{Deserialize, Serialize};

/// One row of the index summary document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: f64,
    pub pe: Option<f64>,
    pub sector: String,
}

/// `data/index.json`: one row per symbol plus run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDocument {
    pub stocks: Vec<IndexEntry>,
    pub last_update: String,
    pub total_stocks: usize,
}

/// Share of real (non-synthetic) records in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQuality {
    pub real_data_count: usize,
    pub total_stocks: usize,
    pub real_data_percentage: f64,
}

impl DataQuality {
    pub fn new(real_data_count: usize, total_stocks: usize) -> Self {
        let real_data_percentage = if total_stocks > 0 {
            round2(real_data_count as f64 / total_stocks as f64 * 100.0)
        } else {
            0.0
        };
        Self {
            real_data_count,
            total_stocks,
            real_data_percentage,
        }
    }
}

/// `static/data/stocks.json`: the document the renderer consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDocument {
    pub stocks: Vec<Quote>,
    pub last_update: String,
    pub data_quality: DataQuality,
}

impl DashboardDocument {
    /// Placeholder shown before the first scrape has run.
    pub fn empty() -> Self {
        Self {
            stocks: Vec::new(),
            last_update: "Never".to_string(),
            data_quality: DataQuality::new(0, 0),
        }
    }
}
