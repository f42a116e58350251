mod detail;
mod documents;
mod fundamentals;
mod history;
pub mod indicators;
mod quote;
mod screener;
mod symbol;
mod technicals;

pub use detail::{BasicInfo, HistoricalSeries, StockDetail};
pub use documents::{DashboardDocument, DataQuality, IndexDocument, IndexEntry};
pub use fundamentals::{CompanyProfile, FinancialReports, Fundamentals};
pub use history::{closes, HistoricalBar};
pub use quote::{Quote, QuoteSource, ESTIMATED_LABEL};
pub use screener::ScreenerCache;
pub use symbol::{SymbolInfo, SymbolRegistry};
pub use technicals::Technicals;
