//! Quote source capability interface.
//!
//! Every upstream source implements [`QuoteAdapter`]; the orchestrator
//! iterates them in fixed priority order. An adapter either returns a fully
//! populated quote or a typed unavailability reason — never a partial
//! record, and never a panic or escaped error.

use crate::models::{Quote, SymbolInfo};
use async_trait::async_trait;
use thiserror::Error;

/// Why a source could not produce a usable quote.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    BadStatus(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("no data for symbol")]
    NoData,

    #[error("stale quote: {age_days} days old")]
    Stale { age_days: i64 },
}

/// Outcome of one adapter attempt.
#[derive(Debug)]
pub enum QuoteFetch {
    Fetched(Quote),
    Unavailable(FetchError),
}

#[async_trait]
pub trait QuoteAdapter: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to retrieve a quote for `symbol` from this source.
    async fn fetch_quote(&self, symbol: &SymbolInfo) -> QuoteFetch;
}
