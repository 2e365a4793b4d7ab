//! Database models for Taskman
//!
//! This module contains the database models and their row operations.
//!
//! # Models
//!
//! - `task`: The tracked task record
//!
//! # Example
//!
//! ```no_run
//! use taskman_shared::models::task::{NewTask, Task};
//! use taskman_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let task = Task::insert(&pool, NewTask::new("Write release notes")).await?;
//! println!("Created task {}", task.id);
//! # Ok(())
//! # }
//! ```

pub mod task;
