// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The surface is a public viewer: no
// authentication. CORS is configured permissively for development; tighten
// `allowed_origins` in production.
//
//   GET  /api/v1/health              liveness + uptime
//   POST /api/v1/analyze             single-ticker snapshot
//   POST /api/v1/compare             multi-ticker normalized performance
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::analytics::compare::ComparisonSet;
use crate::analytics::snapshot::Snapshot;
use crate::app_state::AppState;
use crate::pipeline;
use crate::types::{ApiError, Period};

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .route("/api/v1/compare", post(compare))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        uptime_seconds: state.start_time.elapsed().as_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Analyze
// =============================================================================

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    ticker: String,
    #[serde(default)]
    period: Option<Period>,
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Snapshot>, ApiError> {
    let ticker = pipeline::normalize_ticker(&req.ticker)?;

    let (period, params) = {
        let cfg = state.config.read();
        (
            req.period.unwrap_or(cfg.default_period),
            cfg.indicator_params.clone(),
        )
    };

    info!(ticker, period = %period, "analyze request");
    let snapshot = pipeline::build_snapshot(&state.market, &params, &ticker, period).await?;
    Ok(Json(snapshot))
}

// =============================================================================
// Compare
// =============================================================================

#[derive(Debug, Deserialize)]
struct CompareRequest {
    tickers: Vec<String>,
    #[serde(default)]
    period: Option<Period>,
}

async fn compare(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<ComparisonSet>, ApiError> {
    let (period, max_tickers) = {
        let cfg = state.config.read();
        (
            req.period.unwrap_or(cfg.default_period),
            cfg.max_compare_tickers,
        )
    };

    let tickers = pipeline::normalize_tickers(&req.tickers, max_tickers)?;

    info!(tickers = ?tickers, period = %period, "compare request");
    let set = pipeline::build_comparison(&state.market, &tickers, period).await;
    Ok(Json(set))
}
