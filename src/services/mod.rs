pub mod adapter;
pub mod chart_api;
pub mod collector;
pub mod freshness;
pub mod history_quote;
pub mod market_hours;
pub mod orchestrator;
pub mod quote_summary;
pub mod store;
pub mod synthetic;

pub use adapter::{FetchError, QuoteAdapter, QuoteFetch};
pub use chart_api::ChartClient;
pub use collector::{MarketCollector, MarketSnapshot};
pub use freshness::check_freshness;
pub use history_quote::HistoryQuoteAdapter;
pub use market_hours::{exchange_now_string, is_trading_hours, refresh_interval};
pub use orchestrator::{PacingConfig, QuoteOrchestrator, ScrapeStats};
pub use quote_summary::QuoteSummaryClient;
pub use store::DataStore;
pub use synthetic::SyntheticQuotes;
