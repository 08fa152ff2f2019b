//! User Statistics REST API Routes
//!
//! Statistics are always recomputed from the record store, never cached.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::state::AppState;

/// Response for the per-user statistics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserStatsResponse {
    pub user_id: String,
    pub total_solved: u64,
    pub difficulty_breakdown: BTreeMap<String, u64>,
    pub platform_breakdown: BTreeMap<String, u64>,
}

/// GET /stats/{user_id} - Per-user difficulty and platform breakdowns
#[utoipa::path(
    get,
    path = "/stats/{user_id}",
    tag = "Stats",
    params(
        ("user_id" = String, Path, description = "User identity"),
    ),
    responses(
        (status = 200, description = "User statistics", body = UserStatsResponse),
    ),
)]
pub async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let stats = state.service.get_user_stats(&user_id).await;

    Json(UserStatsResponse {
        user_id,
        total_solved: stats.total_solved,
        difficulty_breakdown: stats.difficulty_breakdown,
        platform_breakdown: stats.platform_breakdown,
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/stats/:user_id", get(user_stats))
        .with_state(state)
}
