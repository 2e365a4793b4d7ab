//! Task service
//!
//! Sits between the transport layer and the task model: validates requests,
//! fills in defaults, and turns store outcomes into [`ServiceError`]s.
//!
//! # Example
//!
//! ```no_run
//! use taskman_shared::db::pool::{create_pool, DatabaseConfig};
//! use taskman_shared::service::{CreateTaskInput, TaskService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//! let service = TaskService::new(pool);
//!
//! let task = service
//!     .create(CreateTaskInput {
//!         title: Some("Ship it".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(task.status, "pending");
//! # Ok(())
//! # }
//! ```

use crate::db::pool;
use crate::error::StorageError;
use crate::models::task::{NewTask, Task, TaskPatch, DEFAULT_STATUS};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors};

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Errors returned by [`TaskService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input failed a precondition
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// No task has the requested ID
    #[error("Task {0} not found")]
    NotFound(i64),

    /// The store could not complete the operation
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Input for creating a task
///
/// Every field is optional at the type level so a missing title is reported
/// as a validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateTaskInput {
    /// Task title (required, non-empty)
    #[serde(default)]
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title cannot be empty")
    )]
    pub title: Option<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Initial status (defaults to "pending")
    #[serde(default)]
    pub status: Option<String>,
}

/// Task service
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct TaskService {
    pool: SqlitePool,
}

impl TaskService {
    /// Creates a service over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The pool this service runs on
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates a task
    ///
    /// # Errors
    ///
    /// - `Validation` if the title is missing or empty
    /// - `Storage` if the insert could not be committed
    pub async fn create(&self, input: CreateTaskInput) -> ServiceResult<Task> {
        input.validate().map_err(into_field_errors)?;

        let CreateTaskInput {
            title,
            description,
            status,
        } = input;

        // validate() guarantees the title is present
        let title = title.ok_or_else(|| {
            ServiceError::Validation(vec![FieldError {
                field: "title".to_string(),
                message: "Title is required".to_string(),
            }])
        })?;

        let task = Task::insert(
            &self.pool,
            NewTask {
                title,
                description,
                status: status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            },
        )
        .await?;

        info!(task_id = task.id, "Task created");
        Ok(task)
    }

    /// Lists all tasks, newest first
    pub async fn list(&self) -> ServiceResult<Vec<Task>> {
        let tasks = Task::list_all(&self.pool).await?;
        debug!(count = tasks.len(), "Tasks listed");
        Ok(tasks)
    }

    /// Fetches one task
    ///
    /// # Errors
    ///
    /// `NotFound` if no task has this ID
    pub async fn get_one(&self, id: i64) -> ServiceResult<Task> {
        Task::find_by_id(&self.pool, id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Applies a partial update
    ///
    /// Fields absent from the patch keep their stored values. A patch with no
    /// fields performs no write and returns the task as it currently is, so
    /// `updated_at` does not move.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no task has this ID (nothing is written), checked
    ///   before the patch is validated
    /// - `Validation` if a present title is empty
    /// - `Storage` if the write could not be committed
    pub async fn update(&self, id: i64, patch: TaskPatch) -> ServiceResult<Task> {
        if patch.is_empty() {
            debug!(task_id = id, "Empty update, returning current task");
            return self.get_one(id).await;
        }

        if let Err(errors) = patch.validate() {
            // An unknown id is reported as such, whatever the patch holds
            self.get_one(id).await?;
            return Err(into_field_errors(errors));
        }

        let fields = patch.present_fields();
        let task = Task::update(&self.pool, id, patch)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        info!(task_id = id, fields = ?fields, "Task updated");
        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// `NotFound` if no task has this ID, including one already deleted
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !Task::delete(&self.pool, id).await? {
            return Err(ServiceError::NotFound(id));
        }

        info!(task_id = id, "Task deleted");
        Ok(())
    }

    /// Checks that the store is reachable
    pub async fn ping(&self) -> ServiceResult<()> {
        pool::health_check(&self.pool).await.map_err(|e| {
            warn!("Store unreachable: {}", e);
            ServiceError::Storage(StorageError::from(e))
        })
    }
}

fn into_field_errors(errors: ValidationErrors) -> ServiceError {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));

    ServiceError::Validation(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_fails_validation() {
        let input = CreateTaskInput::default();
        let err = input.validate().map_err(into_field_errors).unwrap_err();

        match err {
            ServiceError::Validation(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "title");
                assert_eq!(details[0].message, "Title is required");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let input = CreateTaskInput {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = input.validate().map_err(into_field_errors).unwrap_err();

        match err {
            ServiceError::Validation(details) => {
                assert_eq!(details[0].field, "title");
                assert_eq!(details[0].message, "Title cannot be empty");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_input_from_empty_json() {
        let input: CreateTaskInput = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_service_error_display() {
        assert_eq!(ServiceError::NotFound(7).to_string(), "Task 7 not found");
        assert_eq!(
            ServiceError::Validation(vec![]).to_string(),
            "Validation failed: 0 errors"
        );
    }
}
