//! Status endpoint handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use utoipa::OpenApi;

use super::ApiDoc;
use super::dto::{AuctionDto, AuctionListResponse, HealthResponse, SessionCountsResponse};
use crate::app_state::AppState;

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /api/v1/auctions` — Snapshot of open auctions.
#[utoipa::path(
    get,
    path = "/api/v1/auctions",
    tag = "Auctions",
    summary = "List open auctions",
    description = "Returns every auction still accepting bids, sorted by item name.",
    responses(
        (status = 200, description = "Open auctions", body = AuctionListResponse),
    )
)]
pub async fn list_auctions(State(state): State<AppState>) -> impl IntoResponse {
    let auctions: Vec<AuctionDto> = state
        .auction_service
        .list_open_auctions()
        .await
        .into_iter()
        .map(AuctionDto::from)
        .collect();
    let total = auctions.len();
    (StatusCode::OK, Json(AuctionListResponse { auctions, total }))
}

/// `GET /api/v1/sessions` — Connected-session counts.
#[utoipa::path(
    get,
    path = "/api/v1/sessions",
    tag = "Auctions",
    summary = "Count connected sessions",
    responses(
        (status = 200, description = "Session counts by role", body = SessionCountsResponse),
    )
)]
pub async fn session_counts(State(state): State<AppState>) -> impl IntoResponse {
    let counts = state.auction_service.sessions().counts();
    (StatusCode::OK, Json(SessionCountsResponse::from(counts)))
}

/// `GET /api-docs/openapi.json` — OpenAPI document.
pub async fn openapi_handler() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
