pub mod api;

use crate::services::DataStore;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub started_at: Instant,
}

/// Start the axum server
pub async fn serve(store: Arc<DataStore>, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = AppState {
        store: store.clone(),
        started_at: Instant::now(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let static_dir = store.static_dir();
    tracing::info!("Registering routes:");
    tracing::info!("  GET /                     (dashboard HTML)");
    tracing::info!("  GET /api/stocks           (dashboard document)");
    tracing::info!("  GET /api/stocks.csv       (index entries as CSV)");
    tracing::info!("  GET /api/stocks/{{symbol}}  (per-symbol detail)");
    tracing::info!("  GET /api/screener         (screener buckets)");
    tracing::info!("  GET /health");
    tracing::info!("  GET /static/*             (files from {})", static_dir.display());

    let app = Router::new()
        .route("/", get(api::dashboard_handler))
        .route("/api/stocks", get(api::stocks_handler))
        .route("/api/stocks.csv", get(api::stocks_csv_handler))
        .route("/api/stocks/{symbol}", get(api::stock_detail_handler))
        .route("/api/screener", get(api::screener_handler))
        .route("/health", get(api::health_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
