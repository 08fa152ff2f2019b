//! Solved-Problem REST API Routes
//!
//! The write path (`POST /solve`) and the two read paths over records
//! (`GET /solves/{user_id}` cached, `GET /solves` uncached).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use solvetrack_core::{NewSolve, SolvedRecord};

use crate::error::{ApiError, ApiResult};
use crate::service::SnapshotSource;
use crate::state::AppState;

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Response for a successfully recorded solve.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SolveResponse {
    pub message: String,
    pub problem: SolvedRecord,
}

/// Response for a per-user read, tagged with its origin.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserSolvesResponse {
    pub user_id: String,
    pub total_solved: u64,
    pub problems: Vec<SolvedRecord>,
    /// `"cache"` when served from the cache, `"api"` when recomputed.
    pub source: SnapshotSource,
    /// When the snapshot was computed; only present on cache hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

/// Response for the bulk read.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AllSolvesResponse {
    pub total_problems: u64,
    pub problems: Vec<SolvedRecord>,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /solve - Record a solved problem
#[utoipa::path(
    post,
    path = "/solve",
    tag = "Solves",
    request_body = NewSolve,
    responses(
        (status = 201, description = "Problem recorded", body = SolveResponse),
        (status = 400, description = "Missing user_id or title", body = ApiError),
    ),
)]
pub async fn record_solution(
    State(state): State<AppState>,
    Json(req): Json<NewSolve>,
) -> ApiResult<impl IntoResponse> {
    let problem = state.service.record_solution(req).await?;

    let response = SolveResponse {
        message: "Problem solved successfully recorded!".to_string(),
        problem,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /solves/{user_id} - Get a user's solved problems (cache-aside)
#[utoipa::path(
    get,
    path = "/solves/{user_id}",
    tag = "Solves",
    params(
        ("user_id" = String, Path, description = "User identity"),
    ),
    responses(
        (status = 200, description = "User snapshot, newest first", body = UserSolvesResponse),
    ),
)]
pub async fn user_solves(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let (snapshot, source) = state.service.get_user_problems(&user_id).await;

    let cached_at = match source {
        SnapshotSource::Cache => Some(snapshot.computed_at),
        SnapshotSource::Recomputed => None,
    };

    Json(UserSolvesResponse {
        user_id,
        total_solved: snapshot.total_solved,
        problems: snapshot.problems,
        source,
        cached_at,
    })
}

/// GET /solves - Get every solved problem (uncached bulk endpoint)
#[utoipa::path(
    get,
    path = "/solves",
    tag = "Solves",
    responses(
        (status = 200, description = "All records in insertion order", body = AllSolvesResponse),
    ),
)]
pub async fn all_solves(State(state): State<AppState>) -> impl IntoResponse {
    let problems = state.service.get_all_problems().await;

    Json(AllSolvesResponse {
        total_problems: problems.len() as u64,
        problems,
    })
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/solve", post(record_solution))
        .route("/solves", get(all_solves))
        .route("/solves/:user_id", get(user_solves))
        .with_state(state)
}
