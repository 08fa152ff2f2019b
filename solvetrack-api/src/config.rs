//! API Configuration Module
//!
//! Server-level configuration loaded from environment variables with
//! development defaults. Cache configuration lives in
//! `solvetrack_storage::RedisConfig`.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{ApiError, ApiResult};

/// Server configuration: bind address and record-store data file.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind the HTTP listener to.
    pub bind_host: String,

    /// Port for the HTTP listener.
    pub port: u16,

    /// Path of the JSON file holding the record collection.
    pub data_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 5000,
            data_file: PathBuf::from("solved_problems.json"),
        }
    }
}

impl ServerConfig {
    /// Create a ServerConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SOLVETRACK_BIND`: bind interface (default: "0.0.0.0")
    /// - `PORT` or `SOLVETRACK_PORT`: listener port (default: 5000)
    /// - `SOLVETRACK_DATA_FILE`: record collection file
    ///   (default: "solved_problems.json")
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_host = std::env::var("SOLVETRACK_BIND").unwrap_or(defaults.bind_host);
        let port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("SOLVETRACK_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let data_file = std::env::var("SOLVETRACK_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        Self {
            bind_host,
            port,
            data_file,
        }
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
    }
}
