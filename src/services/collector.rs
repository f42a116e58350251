//! Full scrape pipeline: quote resolution, history, enrichment, documents.
//!
//! One `collect` call produces every document the persistence layer writes.
//! Enrichment failures degrade the affected symbol (empty history, null
//! fundamentals) instead of failing the run.

use crate::constants::{DAILY_HISTORY_DAYS, MONTHLY_HISTORY_DAYS, SYMBOL_DELAY_MS};
use crate::error::Result;
use crate::models::{
    BasicInfo, DashboardDocument, DataQuality, Fundamentals, HistoricalSeries, IndexDocument,
    IndexEntry, ScreenerCache, StockDetail, SymbolRegistry, Technicals,
};
use crate::services::adapter::QuoteAdapter;
use crate::services::chart_api::ChartClient;
use crate::services::history_quote::HistoryQuoteAdapter;
use crate::services::market_hours::exchange_now_string;
use crate::services::orchestrator::{PacingConfig, QuoteOrchestrator};
use crate::services::quote_summary::{QuoteSummaryClient, SymbolProfile};
use crate::services::synthetic::SyntheticQuotes;
use chrono::{Datelike, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, warn};

/// Everything one scrape run produces.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub dashboard: DashboardDocument,
    pub index: IndexDocument,
    pub details: Vec<StockDetail>,
    pub fundamentals: BTreeMap<String, Fundamentals>,
    pub screener: ScreenerCache,
}

pub struct MarketCollector {
    orchestrator: QuoteOrchestrator,
    chart: Arc<ChartClient>,
    summary: Arc<QuoteSummaryClient>,
    enrich_delay: std::time::Duration,
}

impl MarketCollector {
    pub fn new() -> Result<Self> {
        Self::with_pacing(PacingConfig::default())
    }

    pub fn with_pacing(pacing: PacingConfig) -> Result<Self> {
        let chart = Arc::new(ChartClient::new()?);
        let summary = Arc::new(QuoteSummaryClient::new()?);

        // Fixed priority: chart meta, quote summary, recent bars, synthetic
        let adapters: Vec<Arc<dyn QuoteAdapter>> = vec![
            chart.clone(),
            summary.clone(),
            Arc::new(HistoryQuoteAdapter::new(chart.clone())),
        ];

        let enrich_delay = std::time::Duration::from_millis(SYMBOL_DELAY_MS);
        let orchestrator = QuoteOrchestrator::new(adapters, SyntheticQuotes::new(), pacing);

        Ok(Self {
            orchestrator,
            chart,
            summary,
            enrich_delay,
        })
    }

    /// Run the full pipeline over the registry.
    pub async fn collect(&self, registry: &SymbolRegistry) -> MarketSnapshot {
        let (mut quotes, stats) = self.orchestrator.resolve_all(registry).await;

        let run_stamp = exchange_now_string();
        let today = Utc::now().date_naive();
        let year = today.year();

        let mut details = Vec::with_capacity(registry.len());
        let mut index_entries = Vec::with_capacity(registry.len());
        let mut fundamentals = BTreeMap::new();

        for (info, quote) in registry.iter().zip(quotes.iter_mut()) {
            info!(symbol = %info.symbol, "Enriching symbol");

            let daily = match self
                .chart
                .fetch_daily_history(&info.symbol, today - Duration::days(DAILY_HISTORY_DAYS), today)
                .await
            {
                Ok(bars) => bars,
                Err(reason) => {
                    warn!(symbol = %info.symbol, %reason, "No daily history");
                    Vec::new()
                }
            };

            let monthly = match self
                .chart
                .fetch_monthly_history(
                    &info.symbol,
                    today - Duration::days(MONTHLY_HISTORY_DAYS),
                    today,
                )
                .await
            {
                Ok(bars) => bars,
                Err(reason) => {
                    warn!(symbol = %info.symbol, %reason, "No monthly history");
                    Vec::new()
                }
            };

            let technicals = Technicals::from_daily_bars(&daily, year);

            let profile = match self.summary.fetch_profile(&info.symbol).await {
                Ok(profile) => profile,
                Err(reason) => {
                    warn!(symbol = %info.symbol, %reason, "No fundamentals");
                    SymbolProfile::default()
                }
            };

            // The chart endpoint has no market cap; backfill from the profile
            if quote.market_cap == 0.0 {
                if let Some(cap) = profile.market_cap {
                    quote.market_cap = cap;
                }
            }

            let mut basic = BasicInfo::from_quote(quote);
            basic.avg_volume = profile.average_volume;
            basic.shares_outstanding = profile.shares_outstanding;
            basic.beta = profile.beta;

            let sector = profile
                .company
                .sector
                .clone()
                .or_else(|| info.sector.clone())
                .unwrap_or_else(|| "Unknown".to_string());

            index_entries.push(IndexEntry {
                symbol: info.symbol.clone(),
                name: quote.name.clone(),
                price: quote.price,
                change: quote.change,
                change_percent: quote.change_percent,
                volume: quote.volume,
                market_cap: quote.market_cap,
                pe: profile.fundamentals.pe,
                sector,
            });

            fundamentals.insert(info.symbol.clone(), profile.fundamentals.clone());

            details.push(StockDetail {
                symbol: info.symbol.clone(),
                basic,
                fundamentals: profile.fundamentals,
                technicals,
                company: profile.company,
                financials: profile.financials,
                historical: HistoricalSeries { daily, monthly },
                last_update: run_stamp.clone(),
            });

            sleep(self.enrich_delay).await;
        }

        let screener = ScreenerCache::build(&index_entries);

        let index = IndexDocument {
            stocks: index_entries,
            last_update: run_stamp.clone(),
            total_stocks: registry.len(),
        };

        let dashboard = DashboardDocument {
            stocks: quotes,
            last_update: run_stamp,
            data_quality: DataQuality::new(stats.real_data_count, registry.len()),
        };

        info!(
            symbols = registry.len(),
            real = stats.real_data_count,
            synthetic = stats.synthetic_count,
            "Snapshot collected"
        );

        MarketSnapshot {
            dashboard,
            index,
            details,
            fundamentals,
            screener,
        }
    }
}
