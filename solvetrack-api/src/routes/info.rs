//! Service Info Endpoint
//!
//! `GET /` returns a small self-describing document: the endpoint catalog
//! and the cache configuration summary.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
    pub caching: CachingInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CachingInfo {
    pub available: bool,
    pub ttl_seconds: u64,
}

/// GET / - API documentation endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "Info",
    responses(
        (status = 200, description = "Service description", body = ServiceInfo),
    ),
)]
pub async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    let endpoints: BTreeMap<String, String> = [
        ("POST /solve", "Record a solved problem"),
        ("GET /solves/{user_id}", "Get a user's solved problems (cached)"),
        ("GET /solves", "Get all solved problems"),
        ("GET /stats/{user_id}", "Get user statistics"),
        ("GET /cache/status", "Cache adapter diagnostics"),
        ("DELETE /cache/{user_id}", "Clear cache for one user"),
        ("GET /health/ready", "Component health"),
        ("GET /openapi.json", "OpenAPI document"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let cache = state.service.cache();
    Json(ServiceInfo {
        message: "SolveTrack - Solved Problems Tracker API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
        caching: CachingInfo {
            available: cache.available(),
            ttl_seconds: cache.ttl().as_secs(),
        },
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new().route("/", get(service_info)).with_state(state)
}
