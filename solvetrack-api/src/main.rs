//! SolveTrack API Server Entry Point
//!
//! Bootstraps configuration, opens the record store, probes the cache
//! backend once, and starts the Axum HTTP server. A missing cache backend
//! downgrades the service, never stops it.

use std::sync::Arc;

use solvetrack_api::{
    create_api_router, telemetry, ApiError, ApiResult, AppState, QueryService, ServerConfig,
};
use solvetrack_storage::{
    CacheBackend, JsonFilePersister, RecordStore, RedisBackend, RedisConfig, SnapshotCache,
};

#[tokio::main]
async fn main() -> ApiResult<()> {
    telemetry::init_tracing();

    let server_config = ServerConfig::from_env();
    let cache_config = RedisConfig::from_env();

    let persister = Arc::new(JsonFilePersister::new(&server_config.data_file));
    let store = Arc::new(RecordStore::open(persister).await?);

    let cache = match RedisBackend::connect(&cache_config).await {
        Ok(backend) => {
            let backend: Arc<dyn CacheBackend> = Arc::new(backend);
            SnapshotCache::connect(backend, cache_config.ttl()).await
        }
        Err(e) => {
            tracing::warn!(
                url = %cache_config.url(),
                error = %e,
                "Cache backend unreachable, serving without cache"
            );
            SnapshotCache::disabled(cache_config.ttl())
        }
    };

    let service = Arc::new(QueryService::new(store, Arc::new(cache)));
    let app = create_api_router(AppState::new(service));

    let addr = server_config.bind_addr()?;
    tracing::info!(%addr, "Starting SolveTrack API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
