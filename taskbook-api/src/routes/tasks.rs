/// Task endpoints
///
/// Every query is scoped to the authenticated user. A task that belongs to
/// someone else is reported exactly like one that does not exist.
///
/// # Endpoints
///
/// - `POST /tasks` - Create a task
/// - `GET /tasks` - List own tasks, oldest first
/// - `GET /tasks/:id` - Get one task
/// - `PUT /tasks/:id` - Replace title and description
/// - `DELETE /tasks/:id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{AppJson, AppPath},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskbook_shared::{
    auth::context::AuthUser,
    models::task::{CreateTask, Task, TaskChanges},
};

const TASK_NOT_FOUND: &str = "Task not found.";

/// Create/update task request
#[derive(Debug, Default, Deserialize)]
pub struct TaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Delete task response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

fn not_found() -> ApiError {
    ApiError::NotFound(TASK_NOT_FOUND.to_string())
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "Buy milk", "description": "2 litres" }
/// ```
///
/// # Response
///
/// `201 Created` with the task:
///
/// ```json
/// {
///   "id": 7,
///   "title": "Buy milk",
///   "description": "2 litres",
///   "user_id": 1,
///   "created_at": "2025-01-01T00:00:00Z",
///   "updated_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or empty title
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(req): AppJson<TaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let title = super::present(req.title)
        .ok_or_else(|| ApiError::BadRequest("Task title is required.".to_string()))?;

    let task = state
        .store
        .create_task(CreateTask {
            title,
            description: req.description.unwrap_or_default(),
            user_id: user.id,
        })
        .await?;

    tracing::debug!(task_id = task.id, user_id = user.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// List own tasks in creation order
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// Authorization: Bearer <token>
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.store.list_tasks(user.id).await?;
    Ok(Json(tasks))
}

/// Get one task
///
/// # Errors
///
/// - `400 Bad Request`: Non-numeric id
/// - `404 Not Found`: No such task for this user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Task>> {
    let task = state
        .store
        .find_task(id, user.id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(task))
}

/// Update a task
///
/// Title is required; a missing description resets it to empty.
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "Buy oat milk", "description": "" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing title or non-numeric id
/// - `404 Not Found`: No such task for this user
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<TaskRequest>,
) -> ApiResult<Json<Task>> {
    // Ownership first, so a foreign id is a 404 whatever the body says
    state
        .store
        .find_task(id, user.id)
        .await?
        .ok_or_else(not_found)?;

    let title = super::present(req.title)
        .ok_or_else(|| ApiError::BadRequest("Title is required.".to_string()))?;

    let task = state
        .store
        .update_task(
            id,
            user.id,
            TaskChanges {
                title,
                description: req.description.unwrap_or_default(),
            },
        )
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(task))
}

/// Delete a task
///
/// # Response
///
/// ```json
/// { "message": "Task deleted." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Non-numeric id
/// - `404 Not Found`: No such task for this user
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    if !state.store.delete_task(id, user.id).await? {
        return Err(not_found());
    }

    tracing::debug!(task_id = id, user_id = user.id, "Task deleted");

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted.".to_string(),
    }))
}
