//! Task endpoints
//!
//! Thin handlers over [`TaskService`](taskman_shared::service::TaskService);
//! service errors become HTTP errors through [`ApiError`](crate::error::ApiError).
//!
//! # Endpoints
//!
//! - `GET /tasks` - List tasks, newest first
//! - `GET /tasks/:id` - Get one task
//! - `POST /tasks` - Create a task
//! - `PUT /tasks/:id` - Partially update a task
//! - `DELETE /tasks/:id` - Delete a task

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskman_shared::{
    models::task::{Task, TaskPatch},
    service::CreateTaskInput,
};

/// Delete task response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Confirmation message
    pub message: String,
}

/// List all tasks
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Database error
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks))
}

/// Get a task by ID
///
/// # Errors
///
/// - `404 Not Found`: No task with this ID
/// - `500 Internal Server Error`: Database error
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get_one(task_id).await?;
    Ok(Json(task))
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// {
///   "title": "Write release notes",
///   "description": "Cover the new endpoints",
///   "status": "pending"
/// }
/// ```
///
/// Only `title` is required; `status` defaults to `"pending"`.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Missing or empty title
/// - `500 Internal Server Error`: Database error
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task
///
/// Every field is optional; omitted (or `null`) fields keep their values.
/// An empty body object returns the task unchanged.
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// Content-Type: application/json
///
/// { "status": "done" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No task with this ID
/// - `422 Unprocessable Entity`: Empty title
/// - `500 Internal Server Error`: Database error
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(patch): Json<TaskPatch>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.update(task_id, patch).await?;
    Ok(Json(task))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: No task with this ID
/// - `500 Internal Server Error`: Database error
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    state.tasks.delete(task_id).await?;

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
