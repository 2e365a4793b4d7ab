//! Common test utilities for store and service integration tests
//!
//! Every test gets its own in-memory SQLite database with the schema applied.

#![allow(dead_code)]

use sqlx::SqlitePool;
use std::time::Duration;
use taskman_shared::db::migrations::ensure_schema;
use taskman_shared::db::pool::{create_pool, DatabaseConfig};
use taskman_shared::models::task::{NewTask, Task};

/// Creates a fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create in-memory pool");
    ensure_schema(&pool).await.expect("Failed to apply schema");
    pool
}

/// Path to a fresh database file in the system temp directory
pub fn temp_database_path() -> String {
    std::env::temp_dir()
        .join(format!("taskman-test-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}

/// Removes a database file and its WAL side files
pub fn remove_database_files(path: &str) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path, suffix));
    }
}

/// Inserts a task with the given title, description and status
pub async fn insert_task(
    pool: &SqlitePool,
    title: &str,
    description: Option<&str>,
    status: &str,
) -> Task {
    Task::insert(
        pool,
        NewTask {
            title: title.to_string(),
            description: description.map(str::to_string),
            status: status.to_string(),
        },
    )
    .await
    .expect("Failed to insert task")
}

/// Waits long enough for the next timestamp to differ from the last one
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}
