use crate::constants::{SCREENER_GROWTH_PE_MIN, SCREENER_LARGE_CAP_MIN, SCREENER_VALUE_PE_MAX};
use crate::models::documents::IndexEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `data/screener_cache.json`: precomputed filter buckets for fast lookup.
///
/// Rebuilt fully from the index entries on every run; entries without a P/E
/// fall into neither the value nor the growth bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenerCache {
    pub value_stocks: Vec<IndexEntry>,
    pub growth_stocks: Vec<IndexEntry>,
    pub large_cap: Vec<IndexEntry>,
    pub sectors: BTreeMap<String, Vec<IndexEntry>>,
}

impl ScreenerCache {
    pub fn build(entries: &[IndexEntry]) -> Self {
        let mut cache = Self::default();

        for entry in entries {
            match entry.pe {
                Some(pe) if pe < SCREENER_VALUE_PE_MAX => {
                    cache.value_stocks.push(entry.clone());
                }
                Some(pe) if pe > SCREENER_GROWTH_PE_MIN => {
                    cache.growth_stocks.push(entry.clone());
                }
                _ => {}
            }

            if entry.market_cap > SCREENER_LARGE_CAP_MIN {
                cache.large_cap.push(entry.clone());
            }

            cache
                .sectors
                .entry(entry.sector.clone())
                .or_default()
                .push(entry.clone());
        }

        cache
    }
}
