//! REST API Routes Module
//!
//! Route handlers organized by concern:
//! - Solved-problem write and read paths
//! - Per-user statistics
//! - Cache diagnostics and explicit invalidation
//! - Health checks (Kubernetes-compatible)
//! - Service info and OpenAPI document
//!
//! CORS is permissive: the service has no authentication surface and is
//! meant to sit behind whatever fronts it.

pub mod cache;
pub mod health;
pub mod info;
pub mod solve;
pub mod stats;

use axum::{response::IntoResponse, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Assemble the full API router.
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(info::create_router(state.clone()))
        .merge(solve::create_router(state.clone()))
        .merge(stats::create_router(state.clone()))
        .merge(cache::create_router(state.clone()))
        .nest("/health", health::create_router(state))
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
