use crate::error::AppError;
use crate::models::DashboardDocument;
use crate::render::render_dashboard;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

/// GET / - server-rendered dashboard
///
/// Falls back to an empty page when no scrape has run yet, mirroring the
/// static-generation path.
pub async fn dashboard_handler(State(state): State<AppState>) -> Html<String> {
    let doc = match state.store.load_dashboard() {
        Ok(doc) => doc,
        Err(e) => {
            debug!(error = %e, "No dashboard document yet");
            DashboardDocument::empty()
        }
    };

    Html(render_dashboard(&doc))
}

/// GET /api/stocks - the dashboard JSON document
pub async fn stocks_handler(State(state): State<AppState>) -> Response {
    match state.store.load_dashboard() {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => not_found(e),
    }
}

/// GET /api/stocks.csv - index entries as CSV
pub async fn stocks_csv_handler(State(state): State<AppState>) -> Response {
    let index = match state.store.load_index() {
        Ok(index) => index,
        Err(e) => return not_found(e),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    let write_rows = move || -> Result<Vec<u8>, AppError> {
        writer.write_record([
            "symbol",
            "name",
            "price",
            "change",
            "changePercent",
            "volume",
            "marketCap",
            "pe",
            "sector",
        ])?;
        for entry in &index.stocks {
            writer.write_record([
                entry.symbol.clone(),
                entry.name.clone(),
                entry.price.to_string(),
                entry.change.to_string(),
                entry.change_percent.to_string(),
                entry.volume.to_string(),
                entry.market_cap.to_string(),
                entry.pe.map(|v| v.to_string()).unwrap_or_default(),
                entry.sector.clone(),
            ])?;
        }
        writer
            .into_inner()
            .map_err(|e| AppError::Io(format!("CSV flush error: {}", e)))
    };

    match write_rows() {
        Ok(body) => ([(CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response(),
        Err(e) => {
            warn!(error = %e, "CSV export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// GET /api/stocks/{symbol} - per-symbol detail document
pub async fn stock_detail_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    let symbol = symbol.to_uppercase();
    match state.store.load_detail(&symbol) {
        Ok(detail) => Json(detail).into_response(),
        Err(e) => not_found(e),
    }
}

/// GET /api/screener - precomputed screener buckets
pub async fn screener_handler(State(state): State<AppState>) -> Response {
    match state.store.load_screener() {
        Ok(cache) => Json(cache).into_response(),
        Err(e) => not_found(e),
    }
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    total_stocks: usize,
    last_update: String,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (total_stocks, last_update) = match state.store.load_dashboard() {
        Ok(doc) => (doc.stocks.len(), doc.last_update),
        Err(_) => (0, "Never".to_string()),
    };

    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
        total_stocks,
        last_update,
    })
}

fn not_found(e: AppError) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": e.to_string()}))).into_response()
}
