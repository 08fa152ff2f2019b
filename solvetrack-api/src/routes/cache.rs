//! Cache Management REST API Routes
//!
//! Diagnostics and explicit per-user invalidation. Both endpoints answer
//! 200 even when the backend is unavailable - cache absence is a state to
//! report, not an error.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Response for the cache status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CacheStatusResponse {
    pub available: bool,
    /// Keys currently held by the backend; absent when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_count: Option<u64>,
    pub ttl_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for an explicit per-user invalidation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CacheClearResponse {
    pub message: String,
    pub keys_deleted: u64,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /cache/status - Adapter diagnostics
#[utoipa::path(
    get,
    path = "/cache/status",
    tag = "Cache",
    responses(
        (status = 200, description = "Cache adapter diagnostics", body = CacheStatusResponse),
    ),
)]
pub async fn cache_status(State(state): State<AppState>) -> impl IntoResponse {
    let diag = state.service.cache().diagnostics().await;

    let message = if diag.available {
        None
    } else {
        Some("Cache backend is not available".to_string())
    };

    Json(CacheStatusResponse {
        available: diag.available,
        key_count: diag.key_count,
        ttl_seconds: diag.ttl_seconds,
        message,
    })
}

/// DELETE /cache/{user_id} - Clear the cached snapshot for one user
#[utoipa::path(
    delete,
    path = "/cache/{user_id}",
    tag = "Cache",
    params(
        ("user_id" = String, Path, description = "User identity"),
    ),
    responses(
        (status = 200, description = "Cache cleared", body = CacheClearResponse),
    ),
)]
pub async fn clear_user_cache(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let cache = state.service.cache();

    if !cache.available() {
        return Json(CacheClearResponse {
            message: "Cache backend is not available, no cache to clear".to_string(),
            keys_deleted: 0,
        });
    }

    let keys_deleted = cache.invalidate(&user_id).await;
    Json(CacheClearResponse {
        message: format!("Cache cleared for user: {}", user_id),
        keys_deleted,
    })
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cache/status", get(cache_status))
        .route("/cache/:user_id", delete(clear_user_cache))
        .with_state(state)
}
