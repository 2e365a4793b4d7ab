//! Schema initialization
//!
//! The schema lives in the `migrations/` directory at the workspace root and
//! is embedded into the binary at compile time. Each migration is a single
//! `{timestamp}_{name}.sql` file.
//!
//! [`ensure_schema`] is called once during start-up, before any request is
//! served. It is idempotent: sqlx records applied versions in
//! `_sqlx_migrations` and skips them on later runs, and the DDL itself uses
//! `IF NOT EXISTS`.
//!
//! # Example
//!
//! ```no_run
//! use taskman_shared::db::pool::{create_pool, DatabaseConfig};
//! use taskman_shared::db::migrations::{ensure_schema, get_schema_status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(DatabaseConfig::default()).await?;
//!
//!     ensure_schema(&pool).await?;
//!
//!     let status = get_schema_status(&pool).await?;
//!     println!("Applied {} migrations", status.applied_migrations);
//!
//!     Ok(())
//! }
//! ```

use crate::error::StorageError;
use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Schema status information
#[derive(Debug, Clone)]
pub struct SchemaStatus {
    /// Number of migrations that have been applied
    pub applied_migrations: usize,

    /// Latest applied migration version (timestamp)
    pub latest_version: Option<i64>,

    /// Whether the `tasks` table exists
    pub tasks_table_exists: bool,

    /// Whether every embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Applies all pending migrations
///
/// Safe to call any number of times; already-applied migrations are skipped.
/// Each migration runs in its own transaction, so a failing migration leaves
/// the schema as it was.
///
/// # Errors
///
/// Returns an error if a migration fails to execute, or if an applied
/// migration no longer matches its embedded checksum.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    info!(
        embedded_migrations = MIGRATOR.iter().count(),
        "Ensuring database schema"
    );

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Schema initialization failed: {}", e);
            Err(StorageError::Migration(e))
        }
    }
}

/// Gets the current schema status
///
/// # Errors
///
/// Returns an error if the SQLite catalog or the migrations table cannot be
/// queried.
pub async fn get_schema_status(pool: &SqlitePool) -> Result<SchemaStatus, StorageError> {
    debug!("Checking schema status");

    let tasks_table_exists = table_exists(pool, "tasks").await?;

    if !table_exists(pool, "_sqlx_migrations").await? {
        debug!("Migrations table does not exist yet");
        return Ok(SchemaStatus {
            applied_migrations: 0,
            latest_version: None,
            tasks_table_exists,
            is_up_to_date: false,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = 1",
    )
    .fetch_one(pool)
    .await?;

    let applied_migrations = usize::try_from(count).unwrap_or_default();
    let embedded_latest = MIGRATOR.iter().map(|m| m.version).max();

    debug!(
        applied_migrations,
        latest_version = ?latest_version,
        "Schema status retrieved"
    );

    Ok(SchemaStatus {
        applied_migrations,
        latest_version,
        tasks_table_exists,
        is_up_to_date: latest_version == embedded_latest,
    })
}

async fn table_exists(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)")
        .bind(name)
        .fetch_one(pool)
        .await
}
