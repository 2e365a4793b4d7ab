//! Task model and database operations
//!
//! This module provides the Task model, the only entity tracked by Taskman,
//! and the row operations the service layer builds on.
//!
//! Every write runs inside its own transaction. A `sqlx::Transaction` that is
//! dropped without `commit()` rolls back, so any `?` between `begin()` and
//! `commit()` leaves the table untouched.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title TEXT NOT NULL CHECK (length(title) > 0),
//!     description TEXT,
//!     status TEXT NOT NULL DEFAULT 'pending',
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     CHECK (created_at <= updated_at)
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use taskman_shared::models::task::{NewTask, Task, TaskPatch};
//! use taskman_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let task = Task::insert(&pool, NewTask::new("Deploy app")).await?;
//!
//! // Only the status changes; title and description are left alone
//! let patch = TaskPatch {
//!     status: Some("done".to_string()),
//!     ..Default::default()
//! };
//! Task::update(&pool, task.id, patch).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;
use validator::Validate;

/// Status given to tasks created without one
pub const DEFAULT_STATUS: &str = "pending";

/// Fixed-width UTC timestamp format used for storage
///
/// Every stored timestamp has the same width, so comparing the text compares
/// the instants. `ORDER BY created_at` and `MAX(?, updated_at)` rely on this.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

fn storage_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Task model representing a tracked task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-assigned ID, never reused
    pub id: i64,

    /// Task title (never empty)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Free-form status (e.g., "pending", "in-progress", "done")
    pub status: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a new task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status
    pub status: String,
}

impl NewTask {
    /// A task with the given title, no description and the default status
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

/// Partial update for a task
///
/// A field that is `None` is absent and leaves the stored value untouched.
/// In JSON, a missing key and an explicit `null` are both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TaskPatch {
    /// New title
    #[serde(default)]
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    /// New description
    #[serde(default)]
    pub description: Option<String>,

    /// New status
    #[serde(default)]
    pub status: Option<String>,
}

impl TaskPatch {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Names of the fields present in the patch
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        fields
    }
}

impl Task {
    /// Inserts a new task
    ///
    /// The store assigns `id`, and `created_at` and `updated_at` are set to the
    /// same instant.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Constraint` if the row violates the schema
    /// (e.g., an empty title), or `StorageError::Database` if the write cannot
    /// be committed. In both cases nothing is written.
    pub async fn insert(pool: &SqlitePool, data: NewTask) -> Result<Self, StorageError> {
        let now = storage_timestamp(Utc::now());

        let mut tx = pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(task_id = task.id, status = %task.status, "Task inserted");
        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, StorageError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task, most recently created first
    ///
    /// Tasks created at the same instant come back in reverse insertion order.
    /// The result is a snapshot taken by a single statement.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, StorageError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_at, updated_at
            FROM tasks
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Merges a patch onto an existing task
    ///
    /// Only fields present in `patch` are written, and `updated_at` is
    /// refreshed. `updated_at` never moves backwards, even if the clock does.
    ///
    /// An empty patch is not a write: the current row is returned as-is and
    /// `updated_at` keeps its value.
    ///
    /// Returns `None` if no task has this ID; nothing is written in that case.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        patch: TaskPatch,
    ) -> Result<Option<Self>, StorageError> {
        if patch.is_empty() {
            debug!(task_id = id, "Empty patch, skipping write");
            return Self::find_by_id(pool, id).await;
        }

        let fields = patch.present_fields();
        let now = storage_timestamp(Utc::now());

        let mut tx = pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                status = COALESCE(?, status),
                updated_at = MAX(?, updated_at)
            WHERE id = ?
            RETURNING id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.status)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        match &task {
            Some(_) => debug!(task_id = id, fields = ?fields, "Task updated"),
            None => debug!(task_id = id, "Task to update not found"),
        }

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns `false` if no task has this ID, including one that was already
    /// deleted.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, StorageError> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        debug!(task_id = id, deleted, "Task delete executed");
        Ok(deleted)
    }

    /// Counts all tasks
    pub async fn count(pool: &SqlitePool) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_storage_timestamp_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::microseconds(123_456);

        assert_eq!(storage_timestamp(whole), "2025-01-03T12:00:00.000000Z");
        assert_eq!(storage_timestamp(fractional), "2025-01-03T12:00:00.123456Z");
        assert!(storage_timestamp(whole) < storage_timestamp(fractional));
    }

    #[test]
    fn test_new_task_defaults() {
        let task = NewTask::new("Write docs");
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.description, None);
        assert_eq!(task.status, DEFAULT_STATUS);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());

        let patch = TaskPatch {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(patch.present_fields(), vec!["description"]);
    }

    #[test]
    fn test_patch_null_and_missing_are_absent() {
        let patch: TaskPatch =
            serde_json::from_str(r#"{"title": null, "status": "done"}"#).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.description, None);
        assert_eq!(patch.status.as_deref(), Some("done"));
    }

    #[test]
    fn test_patch_validation() {
        let patch = TaskPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = TaskPatch {
            title: Some("A".to_string()),
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = TaskPatch {
            status: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
