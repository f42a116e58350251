use crate::error::Error;
use crate::models::SymbolRegistry;
use crate::services::{DataStore, MarketCollector};
use std::path::PathBuf;

pub fn run(symbols: Option<PathBuf>) {
    let registry = match load_registry(symbols) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("❌ Error loading symbol registry: {}", e);
            std::process::exit(1);
        }
    };

    println!("🇮🇩 Scraping {} IDX symbols...", registry.len());
    println!("   Sources: chart API → quote summary → recent history → estimate");

    match run_scrape(registry) {
        Ok(()) => {
            println!("\n✅ Scrape completed successfully!");
        }
        Err(e) => {
            eprintln!("\n❌ Scrape failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_registry(symbols: Option<PathBuf>) -> Result<SymbolRegistry, Error> {
    match symbols {
        Some(path) => SymbolRegistry::from_file(&path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e))),
        None => Ok(SymbolRegistry::builtin()),
    }
}

fn run_scrape(registry: SymbolRegistry) -> Result<(), Error> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Network(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(async {
        let collector = MarketCollector::new()?;
        let snapshot = collector.collect(&registry).await;

        let store = DataStore::from_env();
        store.write_snapshot(&snapshot)?;

        let quality = &snapshot.dashboard.data_quality;
        println!("\n📊 Data quality:");
        println!("   Real sources:       {}/{}", quality.real_data_count, quality.total_stocks);
        println!(
            "   Fallback estimates: {}/{}",
            quality.total_stocks - quality.real_data_count,
            quality.total_stocks
        );
        println!("   Real data:          {:.1}%", quality.real_data_percentage);
        println!("\n💾 Documents written under {}", store.data_dir().display());

        Ok(())
    })
}
