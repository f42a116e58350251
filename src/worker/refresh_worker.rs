use crate::models::SymbolRegistry;
use crate::services::{refresh_interval, DataStore, MarketCollector};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

// Trading hours: 15 minutes (active market)
// Non-trading hours: 2 hours (market closed, relaxed refresh)
const TRADING_INTERVAL_SECS: u64 = 900;
const NON_TRADING_INTERVAL_SECS: u64 = 7200;

/// Background refresh loop: scrape, persist, sleep. Failures are logged and
/// the loop continues; it only stops with the process.
pub async fn run(store: Arc<DataStore>, registry: SymbolRegistry) {
    info!(
        "Starting refresh worker - Trading hours: {}s, Non-trading hours: {}s",
        TRADING_INTERVAL_SECS, NON_TRADING_INTERVAL_SECS
    );

    let mut iteration_count = 0u64;

    loop {
        iteration_count += 1;
        let loop_start = std::time::Instant::now();

        info!(iteration = iteration_count, "Refresh worker: starting scrape");

        match MarketCollector::new() {
            Ok(collector) => {
                let snapshot = collector.collect(&registry).await;
                match store.write_snapshot(&snapshot) {
                    Ok(()) => {
                        info!(
                            iteration = iteration_count,
                            real = snapshot.dashboard.data_quality.real_data_count,
                            total = snapshot.dashboard.data_quality.total_stocks,
                            duration_secs = loop_start.elapsed().as_secs_f64(),
                            "Refresh worker: snapshot written"
                        );
                    }
                    Err(e) => {
                        error!(iteration = iteration_count, error = %e, "Refresh worker: write failed");
                    }
                }
            }
            Err(e) => {
                error!(iteration = iteration_count, error = %e, "Refresh worker: collector setup failed");
            }
        }

        let interval = refresh_interval(
            Duration::from_secs(TRADING_INTERVAL_SECS),
            Duration::from_secs(NON_TRADING_INTERVAL_SECS),
        );

        info!(
            iteration = iteration_count,
            next_refresh_secs = interval.as_secs(),
            "Refresh worker: iteration completed"
        );

        sleep(interval).await;
    }
}
