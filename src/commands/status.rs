use crate::services::DataStore;

pub fn run() {
    println!("📊 IDX Cache Status\n");

    match show_status() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status() -> Result<(), Box<dyn std::error::Error>> {
    let store = DataStore::from_env();

    let index = match store.load_index() {
        Ok(index) => index,
        Err(_) => {
            println!("⚠️  No market data found. Run 'scrape' first.");
            return Ok(());
        }
    };

    println!("📈 Total stocks: {}", index.total_stocks);
    println!("🕐 Last update:  {}\n", index.last_update);

    println!("═══════════════════════════════════════════════════════════\n");

    for entry in index.stocks.iter().take(5) {
        let direction = if entry.change >= 0.0 { "▲" } else { "▼" };
        println!(
            "🔹 {:10} {:>10.0} IDR  {} {:+.2}%  ({})",
            entry.symbol, entry.price, direction, entry.change_percent, entry.sector
        );
    }
    if index.stocks.len() > 5 {
        println!("   ... and {} more", index.stocks.len() - 5);
    }

    if let Ok(screener) = store.load_screener() {
        println!("\n═══════════════════════════════════════════════════════════\n");
        println!("🔍 Screener buckets:");
        println!("   Value stocks:  {}", screener.value_stocks.len());
        println!("   Growth stocks: {}", screener.growth_stocks.len());
        println!("   Large cap:     {}", screener.large_cap.len());
        println!("   Sectors:       {}", screener.sectors.len());
    }

    if let Ok(dashboard) = store.load_dashboard() {
        println!(
            "\n💡 Real data share: {:.1}% ({}/{} symbols)",
            dashboard.data_quality.real_data_percentage,
            dashboard.data_quality.real_data_count,
            dashboard.data_quality.total_stocks
        );
    }

    Ok(())
}
