//! OpenAPI document for the SolveTrack API.

use utoipa::OpenApi;

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SolveTrack API",
        description = "Solved-problems tracker with cache-aside per-user reads",
        license(name = "MIT"),
    ),
    paths(
        routes::info::service_info,
        routes::solve::record_solution,
        routes::solve::user_solves,
        routes::solve::all_solves,
        routes::stats::user_stats,
        routes::cache::cache_status,
        routes::cache::clear_user_cache,
        routes::health::ping,
        routes::health::liveness,
        routes::health::readiness,
    ),
    components(schemas(
        solvetrack_core::SolvedRecord,
        solvetrack_core::NewSolve,
        crate::error::ApiError,
        crate::error::ErrorCode,
        crate::service::SnapshotSource,
        routes::info::ServiceInfo,
        routes::info::CachingInfo,
        routes::solve::SolveResponse,
        routes::solve::UserSolvesResponse,
        routes::solve::AllSolvesResponse,
        routes::stats::UserStatsResponse,
        routes::cache::CacheStatusResponse,
        routes::cache::CacheClearResponse,
        routes::health::HealthResponse,
        routes::health::HealthStatus,
        routes::health::HealthDetails,
        routes::health::ComponentHealth,
    )),
    tags(
        (name = "Solves", description = "Record and read solved problems"),
        (name = "Stats", description = "Per-user statistics"),
        (name = "Cache", description = "Cache diagnostics and invalidation"),
        (name = "Health", description = "Health checks"),
        (name = "Info", description = "Service description"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/solve"));
        assert!(json.contains("/cache/status"));
    }
}
