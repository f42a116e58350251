use crate::models::DashboardDocument;
use crate::render::render_dashboard;
use crate::services::DataStore;
use std::path::PathBuf;

pub fn run(output: Option<PathBuf>) {
    let store = DataStore::from_env();

    let doc = match store.load_dashboard() {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("⚠️  No dashboard data ({}), rendering empty page", e);
            DashboardDocument::empty()
        }
    };

    let html = render_dashboard(&doc);

    let result = match output {
        Some(path) => std::fs::write(&path, html).map(|_| path),
        None => store.write_html(&html).map_err(std::io::Error::other),
    };

    match result {
        Ok(path) => {
            println!("✅ Static HTML generated: {}", path.display());
            println!("   {} stocks, last update: {}", doc.stocks.len(), doc.last_update);
        }
        Err(e) => {
            eprintln!("❌ Failed to write HTML: {}", e);
            std::process::exit(1);
        }
    }
}
