//! Fallback orchestration across quote sources.
//!
//! Per symbol: try each adapter in fixed priority order, validate freshness
//! on every real-source quote, and synthesize an estimate when the chain is
//! exhausted. The terminal state always yields a quote; no symbol is left
//! unresolved and no single symbol's failure aborts the run.

use crate::constants::{BATCH_DELAY_SECS, BATCH_SIZE, SYMBOL_DELAY_MS};
use crate::models::{Quote, SymbolInfo, SymbolRegistry};
use crate::services::adapter::{QuoteAdapter, QuoteFetch};
use crate::services::freshness::check_freshness;
use crate::services::synthetic::SyntheticQuotes;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Cooperative pacing between upstream calls.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    pub symbol_delay: Duration,
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            symbol_delay: Duration::from_millis(SYMBOL_DELAY_MS),
            batch_size: BATCH_SIZE,
            batch_delay: Duration::from_secs(BATCH_DELAY_SECS),
        }
    }
}

impl PacingConfig {
    /// Zero delays, for tests and offline runs.
    pub fn none() -> Self {
        Self {
            symbol_delay: Duration::ZERO,
            batch_size: usize::MAX,
            batch_delay: Duration::ZERO,
        }
    }
}

/// Counters for the run's data-quality block.
#[derive(Debug, Clone, Default)]
pub struct ScrapeStats {
    pub real_data_count: usize,
    pub synthetic_count: usize,
}

impl ScrapeStats {
    pub fn total(&self) -> usize {
        self.real_data_count + self.synthetic_count
    }

    fn record(&mut self, quote: &Quote) {
        if quote.source.is_real() {
            self.real_data_count += 1;
        } else {
            self.synthetic_count += 1;
        }
    }
}

pub struct QuoteOrchestrator {
    adapters: Vec<Arc<dyn QuoteAdapter>>,
    synthetic: SyntheticQuotes,
    pacing: PacingConfig,
}

impl QuoteOrchestrator {
    pub fn new(
        adapters: Vec<Arc<dyn QuoteAdapter>>,
        synthetic: SyntheticQuotes,
        pacing: PacingConfig,
    ) -> Self {
        Self {
            adapters,
            synthetic,
            pacing,
        }
    }

    /// Resolve one symbol to exactly one quote, real or synthetic.
    pub async fn resolve(&self, info: &SymbolInfo) -> Quote {
        let now = Utc::now();

        for adapter in &self.adapters {
            match adapter.fetch_quote(info).await {
                QuoteFetch::Fetched(quote) => match check_freshness(&quote, now) {
                    Ok(()) => {
                        debug!(
                            symbol = %info.symbol,
                            adapter = adapter.name(),
                            price = quote.price,
                            "Quote accepted"
                        );
                        return quote;
                    }
                    Err(reason) => {
                        warn!(
                            symbol = %info.symbol,
                            adapter = adapter.name(),
                            %reason,
                            "Quote rejected by freshness check"
                        );
                    }
                },
                QuoteFetch::Unavailable(reason) => {
                    warn!(
                        symbol = %info.symbol,
                        adapter = adapter.name(),
                        %reason,
                        "Source unavailable"
                    );
                }
            }
        }

        info!(symbol = %info.symbol, "All sources exhausted, synthesizing estimate");
        self.synthetic.generate(info)
    }

    /// Resolve every registry symbol sequentially with pacing delays.
    pub async fn resolve_all(&self, registry: &SymbolRegistry) -> (Vec<Quote>, ScrapeStats) {
        let mut quotes = Vec::with_capacity(registry.len());
        let mut stats = ScrapeStats::default();
        let total = registry.len();

        for (idx, info) in registry.iter().enumerate() {
            info!(symbol = %info.symbol, position = idx + 1, total, "Resolving symbol");

            let quote = self.resolve(info).await;
            stats.record(&quote);
            quotes.push(quote);

            if idx + 1 == total {
                break;
            }

            if (idx + 1) % self.pacing.batch_size == 0 {
                sleep(self.pacing.batch_delay).await;
            } else {
                sleep(self.pacing.symbol_delay).await;
            }
        }

        info!(
            real = stats.real_data_count,
            synthetic = stats.synthetic_count,
            "Scrape resolution finished"
        );

        (quotes, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuoteSource, ESTIMATED_LABEL};
    use crate::services::adapter::FetchError;
    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;

    /// Test adapter returning either a canned quote or a canned refusal.
    struct StaticAdapter {
        name: &'static str,
        quote: Option<Quote>,
    }

    impl StaticAdapter {
        fn available(name: &'static str, quote: Quote) -> Self {
            Self {
                name,
                quote: Some(quote),
            }
        }

        fn unavailable(name: &'static str) -> Self {
            Self { name, quote: None }
        }
    }

    #[async_trait]
    impl QuoteAdapter for StaticAdapter {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch_quote(&self, _info: &SymbolInfo) -> QuoteFetch {
            match &self.quote {
                Some(quote) => QuoteFetch::Fetched(quote.clone()),
                None => QuoteFetch::Unavailable(FetchError::Network("connection refused".into())),
            }
        }
    }

    fn real_quote(source: QuoteSource, price: f64, age_days: i64) -> Quote {
        let (change, change_percent) = Quote::change_parts(price, 9000.0);
        let mut quote = Quote {
            symbol: "BBCA.JK".to_string(),
            name: "Bank Central Asia".to_string(),
            price,
            previous_close: 9000.0,
            change,
            change_percent,
            volume: 12_000_000,
            day_high: price + 25.0,
            day_low: price - 25.0,
            fifty_two_week_high: 10_000.0,
            fifty_two_week_low: 8_000.0,
            market_cap: 0.0,
            source,
            as_of: None,
            last_update: ESTIMATED_LABEL.to_string(),
        };
        quote.set_observed(Utc::now() - ChronoDuration::days(age_days));
        quote
    }

    fn info() -> SymbolInfo {
        SymbolInfo::new("BBCA.JK", "Bank Central Asia")
    }

    fn orchestrator(adapters: Vec<Arc<dyn QuoteAdapter>>) -> QuoteOrchestrator {
        QuoteOrchestrator::new(adapters, SyntheticQuotes::new(), PacingConfig::none())
    }

    #[tokio::test]
    async fn test_first_fresh_source_wins() {
        let orchestrator = orchestrator(vec![
            Arc::new(StaticAdapter::available(
                "first",
                real_quote(QuoteSource::ChartApi, 9100.0, 0),
            )),
            Arc::new(StaticAdapter::available(
                "second",
                real_quote(QuoteSource::QuoteSummary, 9050.0, 0),
            )),
        ]);

        let quote = orchestrator.resolve(&info()).await;
        assert_eq!(quote.source, QuoteSource::ChartApi);
        assert_eq!(quote.price, 9100.0);
    }

    #[tokio::test]
    async fn test_unavailable_source_falls_through() {
        let orchestrator = orchestrator(vec![
            Arc::new(StaticAdapter::unavailable("first")),
            Arc::new(StaticAdapter::available(
                "second",
                real_quote(QuoteSource::QuoteSummary, 9050.0, 0),
            )),
        ]);

        let quote = orchestrator.resolve(&info()).await;
        assert_eq!(quote.source, QuoteSource::QuoteSummary);
    }

    #[tokio::test]
    async fn test_stale_quote_falls_through() {
        let orchestrator = orchestrator(vec![
            Arc::new(StaticAdapter::available(
                "stale",
                real_quote(QuoteSource::ChartApi, 9100.0, 5),
            )),
            Arc::new(StaticAdapter::available(
                "fresh",
                real_quote(QuoteSource::QuoteSummary, 9050.0, 0),
            )),
        ]);

        let quote = orchestrator.resolve(&info()).await;
        assert_eq!(quote.source, QuoteSource::QuoteSummary);
        assert_eq!(quote.price, 9050.0);
    }

    #[tokio::test]
    async fn test_exhausted_chain_synthesizes() {
        let orchestrator = orchestrator(vec![
            Arc::new(StaticAdapter::unavailable("first")),
            Arc::new(StaticAdapter::available(
                "stale",
                real_quote(QuoteSource::QuoteSummary, 9100.0, 5),
            )),
        ]);

        let quote = orchestrator.resolve(&info()).await;
        assert_eq!(quote.source, QuoteSource::Synthetic);
        assert_eq!(quote.last_update, ESTIMATED_LABEL);
    }

    #[tokio::test]
    async fn test_every_symbol_resolves() {
        let registry = SymbolRegistry::builtin();
        let orchestrator = orchestrator(vec![Arc::new(StaticAdapter::unavailable("down"))]);

        let (quotes, stats) = orchestrator.resolve_all(&registry).await;

        assert_eq!(quotes.len(), registry.len());
        assert_eq!(stats.synthetic_count, registry.len());
        assert_eq!(stats.real_data_count, 0);
        for (info, quote) in registry.iter().zip(&quotes) {
            assert_eq!(info.symbol, quote.symbol);
        }
    }

    #[tokio::test]
    async fn test_stats_count_real_sources() {
        let registry = SymbolRegistry::builtin();
        let orchestrator = orchestrator(vec![Arc::new(StaticAdapter::available(
            "up",
            real_quote(QuoteSource::ChartApi, 9100.0, 0),
        ))]);

        let (quotes, stats) = orchestrator.resolve_all(&registry).await;
        assert_eq!(stats.real_data_count, registry.len());
        assert_eq!(stats.total(), quotes.len());
    }
}
