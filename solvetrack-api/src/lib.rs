//! SolveTrack API - REST layer and cache-aside orchestration
//!
//! Thin axum plumbing around the [`service::QueryService`], which carries
//! the actual design contract: cache-aside reads, store-then-invalidate
//! writes, and graceful degradation when the cache backend is gone.

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use service::{QueryService, SnapshotSource};
pub use state::AppState;
