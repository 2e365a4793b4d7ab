//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - In-memory database setup with the schema applied
//! - Router construction with a test configuration
//! - Request helpers returning status and parsed JSON body

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use taskman_api::app::{build_router, AppState};
use taskman_api::config::{ApiConfig, Config, DatabaseSettings, LogFormat, LoggingConfig};
use taskman_shared::db::migrations::ensure_schema;
use taskman_shared::db::pool::{create_pool, DatabaseConfig};
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        let db = create_pool(DatabaseConfig::in_memory()).await?;
        ensure_schema(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Sends a request and returns the status and JSON body (`Null` if empty)
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    /// Creates a task through the API and returns its JSON
    pub async fn create_task(&self, body: Value) -> Value {
        let (status, json) = self.send("POST", "/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
        json
    }
}

/// Configuration used by every test
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:3000".to_string()],
        },
        database: DatabaseSettings {
            file: ":memory:".to_string(),
            max_connections: 1,
        },
        logging: LoggingConfig {
            format: LogFormat::Pretty,
        },
    }
}

/// Waits long enough for the next timestamp to differ from the last one
pub async fn tick() {
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
}
