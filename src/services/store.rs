//! JSON persistence with a fixed directory layout.
//!
//! ```text
//! <root>/data/index.json
//! <root>/data/stocks/<SYM>.json
//! <root>/data/historicals/<SYM>_daily.json
//! <root>/data/fundamentals.json
//! <root>/data/screener_cache.json
//! <root>/static/data/stocks.json
//! <root>/index.html
//! ```
//!
//! Overwrite semantics: each run replaces the previous run's files in full,
//! there is no merge or diff. Atomicity is whatever the underlying file
//! write provides.

use crate::error::{AppError, Result};
use crate::models::{DashboardDocument, IndexDocument, ScreenerCache, StockDetail};
use crate::services::collector::MarketSnapshot;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root from the `IDX_DATA_ROOT` env var, default current directory.
    pub fn from_env() -> Self {
        Self::new(crate::utils::get_data_root())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join("static")
    }

    pub fn dashboard_path(&self) -> PathBuf {
        self.static_dir().join("data").join("stocks.json")
    }

    pub fn html_path(&self) -> PathBuf {
        self.root.join("index.html")
    }

    /// File stem for a symbol: ticker minus the exchange suffix.
    fn file_stem(symbol: &str) -> String {
        symbol.trim_end_matches(".JK").to_string()
    }

    fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.data_dir().join("stocks"))?;
        fs::create_dir_all(self.data_dir().join("historicals"))?;
        fs::create_dir_all(self.static_dir().join("data"))?;
        Ok(())
    }

    fn write_pretty<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let body = serde_json::to_string_pretty(value)?;
        fs::write(path, body)?;
        Ok(())
    }

    fn write_compact<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let body = serde_json::to_string(value)?;
        fs::write(path, body)?;
        Ok(())
    }

    /// Persist the whole result set, replacing the previous run's files.
    pub fn write_snapshot(&self, snapshot: &MarketSnapshot) -> Result<()> {
        self.ensure_layout()?;

        let data_dir = self.data_dir();
        self.write_pretty(&data_dir.join("index.json"), &snapshot.index)?;
        self.write_pretty(&data_dir.join("fundamentals.json"), &snapshot.fundamentals)?;
        self.write_pretty(&data_dir.join("screener_cache.json"), &snapshot.screener)?;

        for detail in &snapshot.details {
            let stem = Self::file_stem(&detail.symbol);
            self.write_pretty(
                &data_dir.join("stocks").join(format!("{}.json", stem)),
                detail,
            )?;
            // historical series are large; keep them compact
            self.write_compact(
                &data_dir
                    .join("historicals")
                    .join(format!("{}_daily.json", stem)),
                &detail.historical.daily,
            )?;
        }

        self.write_pretty(&self.dashboard_path(), &snapshot.dashboard)?;

        info!(
            root = %self.root.display(),
            symbols = snapshot.details.len(),
            "Snapshot written"
        );

        Ok(())
    }

    /// Write the rendered dashboard HTML to the root.
    pub fn write_html(&self, html: &str) -> Result<PathBuf> {
        let path = self.html_path();
        fs::write(&path, html)?;
        Ok(path)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let body = fs::read_to_string(path)
            .map_err(|_| AppError::NotFound(format!("{}", path.display())))?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn load_dashboard(&self) -> Result<DashboardDocument> {
        self.read_json(&self.dashboard_path())
    }

    pub fn load_index(&self) -> Result<IndexDocument> {
        self.read_json(&self.data_dir().join("index.json"))
    }

    pub fn load_screener(&self) -> Result<ScreenerCache> {
        self.read_json(&self.data_dir().join("screener_cache.json"))
    }

    pub fn load_detail(&self, symbol: &str) -> Result<StockDetail> {
        let stem = Self::file_stem(symbol);
        self.read_json(&self.data_dir().join("stocks").join(format!("{}.json", stem)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::indicators::round2;
    use crate::models::{
        BasicInfo, DataQuality, Fundamentals, HistoricalBar, HistoricalSeries, IndexEntry, Quote,
        QuoteSource, Technicals,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn quote(symbol: &str, price: f64) -> Quote {
        let previous_close = price - 50.0;
        let (change, change_percent) = Quote::change_parts(price, previous_close);
        Quote {
            symbol: symbol.to_string(),
            name: format!("{} Tbk", symbol),
            price,
            previous_close,
            change,
            change_percent,
            volume: 1_000_000,
            day_high: price + 20.0,
            day_low: price - 30.0,
            fifty_two_week_high: price * 1.3,
            fifty_two_week_low: price * 0.7,
            market_cap: price * 1.0e10,
            source: QuoteSource::ChartApi,
            as_of: None,
            last_update: "2026-08-06 10:00:00".to_string(),
        }
    }

    fn snapshot(symbols: &[&str]) -> MarketSnapshot {
        let quotes: Vec<Quote> = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| quote(s, 1000.0 + i as f64 * 100.0))
            .collect();

        let entries: Vec<IndexEntry> = quotes
            .iter()
            .map(|q| IndexEntry {
                symbol: q.symbol.clone(),
                name: q.name.clone(),
                price: q.price,
                change: q.change,
                change_percent: q.change_percent,
                volume: q.volume,
                market_cap: q.market_cap,
                pe: Some(14.0),
                sector: "Financial Services".to_string(),
            })
            .collect();

        let details: Vec<StockDetail> = quotes
            .iter()
            .map(|q| StockDetail {
                symbol: q.symbol.clone(),
                basic: BasicInfo::from_quote(q),
                fundamentals: Fundamentals::default(),
                technicals: Technicals::default(),
                company: Default::default(),
                financials: Default::default(),
                historical: HistoricalSeries {
                    daily: vec![HistoricalBar {
                        date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
                        open: q.price,
                        high: q.day_high,
                        low: q.day_low,
                        close: q.price,
                        volume: q.volume,
                    }],
                    monthly: Vec::new(),
                },
                last_update: "2026-08-06 10:00:00 WIB".to_string(),
            })
            .collect();

        let mut fundamentals = BTreeMap::new();
        for q in &quotes {
            fundamentals.insert(q.symbol.clone(), Fundamentals::default());
        }

        MarketSnapshot {
            dashboard: DashboardDocument {
                stocks: quotes,
                last_update: "2026-08-06 10:00:00 WIB".to_string(),
                data_quality: DataQuality::new(symbols.len(), symbols.len()),
            },
            index: IndexDocument {
                stocks: entries.clone(),
                last_update: "2026-08-06 10:00:00 WIB".to_string(),
                total_stocks: symbols.len(),
            },
            details,
            fundamentals,
            screener: crate::models::ScreenerCache::build(&entries),
        }
    }

    #[test]
    fn test_round_trip_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path());
        let snapshot = snapshot(&["BBCA.JK", "TLKM.JK"]);

        store.write_snapshot(&snapshot).unwrap();

        assert!(dir.path().join("data/index.json").exists());
        assert!(dir.path().join("data/stocks/BBCA.json").exists());
        assert!(dir.path().join("data/historicals/TLKM_daily.json").exists());
        assert!(dir.path().join("data/fundamentals.json").exists());
        assert!(dir.path().join("data/screener_cache.json").exists());
        assert!(dir.path().join("static/data/stocks.json").exists());

        let index = store.load_index().unwrap();
        assert_eq!(index.stocks.len(), 2);
        assert_eq!(index.total_stocks, 2);

        let dashboard = store.load_dashboard().unwrap();
        assert_eq!(dashboard.stocks.len(), 2);
        assert_eq!(dashboard.data_quality.real_data_percentage, 100.0);

        let detail = store.load_detail("BBCA.JK").unwrap();
        assert_eq!(detail.symbol, "BBCA.JK");
        assert_eq!(detail.historical.daily.len(), 1);
    }

    #[test]
    fn test_index_document_has_one_entry_per_symbol() {
        let symbols: Vec<String> = (0..20).map(|i| format!("SYM{:02}.JK", i)).collect();
        let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();

        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path());
        store.write_snapshot(&snapshot(&refs)).unwrap();

        let index = store.load_index().unwrap();
        assert_eq!(index.stocks.len(), 20);
        for entry in &index.stocks {
            assert!(!entry.symbol.is_empty());
            assert!(!entry.name.is_empty());
            assert!(entry.pe.is_some());
            assert!(!entry.sector.is_empty());
            // change-percent stays consistent with the price pair
            let previous_close = entry.price - entry.change;
            let expected = round2(entry.change / previous_close * 100.0);
            assert_eq!(entry.change_percent, expected);
        }
    }

    #[test]
    fn test_overwrite_replaces_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path());

        store.write_snapshot(&snapshot(&["BBCA.JK", "TLKM.JK"])).unwrap();
        store.write_snapshot(&snapshot(&["BBCA.JK"])).unwrap();

        let index = store.load_index().unwrap();
        assert_eq!(index.stocks.len(), 1);
    }

    #[test]
    fn test_missing_files_report_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path());

        assert!(matches!(
            store.load_dashboard(),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.load_detail("BBCA.JK"),
            Err(AppError::NotFound(_))
        ));
    }
}
