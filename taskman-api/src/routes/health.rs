//! Welcome and health check endpoints
//!
//! # Endpoints
//!
//! ```text
//! GET /        Welcome message
//! GET /health  Server and database status
//! ```
//!
//! # Health Response
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "database": "connected",
//!   "database_type": "SQLite",
//!   "database_file": "task_manager.db"
//! }
//! ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Welcome response
#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    /// Greeting
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status ("healthy" or "degraded")
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status ("connected" or "disconnected")
    pub database: String,

    /// Database engine
    pub database_type: String,

    /// Database file in use
    pub database_file: String,
}

/// Welcome handler
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Task Manager API".to_string(),
    })
}

/// Health check handler
///
/// Runs a trivial read against the store. The response is always `200 OK`;
/// reachability is reported in the body.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_status = match state.tasks.ping().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
        database_type: "SQLite".to_string(),
        database_file: state.config.database.file.clone(),
    })
}
