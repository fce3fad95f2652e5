//! Read-only HTTP status surface.
//!
//! Enabled when `STATUS_ADDR` is configured. Exposes health, the open
//! auctions and connected-session counts as JSON, plus the OpenAPI
//! document. Nothing here mutates auction state.

pub mod dto;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the status surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "silent-auction status API"),
    paths(
        handlers::health_handler,
        handlers::list_auctions,
        handlers::session_counts,
    ),
    components(schemas(
        dto::HealthResponse,
        dto::AuctionDto,
        dto::AuctionListResponse,
        dto::SessionCountsResponse,
    )),
    tags(
        (name = "System", description = "Service health"),
        (name = "Auctions", description = "Live auction state"),
    )
)]
pub struct ApiDoc;

/// Builds the status router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/v1/auctions", get(handlers::list_auctions))
        .route("/api/v1/sessions", get(handlers::session_counts))
        .route("/api-docs/openapi.json", get(handlers::openapi_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
