use crate::models::SymbolRegistry;
use crate::server;
use crate::services::DataStore;
use crate::worker;
use std::sync::Arc;

pub fn run(port: u16) {
    println!("🚀 Starting idxpulse server on port {}", port);

    let store = Arc::new(DataStore::from_env());
    println!("📁 Data root: {}", store.data_dir().display());

    match store.load_dashboard() {
        Ok(doc) => {
            println!("✅ Cached dashboard loaded:");
            println!("   📈 Stocks:       {}", doc.stocks.len());
            println!("   🕐 Last update:  {}", doc.last_update);
            println!(
                "   📊 Real data:    {:.1}%",
                doc.data_quality.real_data_percentage
            );
        }
        Err(e) => {
            println!("⚠️  No cached dashboard yet ({})", e);
            println!("   Server starts empty; the refresh worker will populate it.");
        }
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    runtime.block_on(async {
        println!("🔄 Spawning background refresh worker...");
        let worker_store = store.clone();
        tokio::spawn(async move {
            worker::run_refresh_worker(worker_store, SymbolRegistry::builtin()).await;
        });

        println!("🌐 Starting HTTP server...");
        if let Err(e) = server::serve(store, port).await {
            eprintln!("❌ Server error: {}", e);
            std::process::exit(1);
        }
    });
}
