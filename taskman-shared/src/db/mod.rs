//! Database layer for Taskman
//!
//! This module provides SQLite connection pooling and schema initialization.
//!
//! # Modules
//!
//! - `pool`: SQLite connection pool management with health checks
//! - `migrations`: Embedded schema migrations applied at start-up
//! - Models are in the `models` module at crate root level
//!
//! # Example
//!
//! ```no_run
//! use taskman_shared::db::{migrations::ensure_schema, pool::{create_pool, DatabaseConfig}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(DatabaseConfig::for_file("task_manager.db")).await?;
//!     ensure_schema(&pool).await?;
//!     Ok(())
//! }
//! ```

pub mod migrations;
pub mod pool;
