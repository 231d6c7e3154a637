use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use taskhub_core::{Task, TaskInput};

use crate::{
    error::{ApiError, FieldError},
    extract::AppJson,
    state::ApiState,
};

/// Read all tasks
pub async fn list_tasks(State(state): State<ApiState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.repo.list_tasks().await?;
    Ok(Json(tasks))
}

/// Create a new task
pub async fn create_task(
    State(state): State<ApiState>,
    AppJson(input): AppJson<TaskInput>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state
        .repo
        .create_task(
            &input.title,
            input.description_or_default(),
            input.status_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Retrieve a single task by ID
pub async fn get_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;

    match state.repo.get_task(id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound(id)),
    }
}

/// Update a task by ID
pub async fn update_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<TaskInput>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;

    match state
        .repo
        .update_task(
            id,
            &input.title,
            input.description_or_default(),
            input.status_or_default(),
        )
        .await?
    {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound(id)),
    }
}

/// Delete a task by ID
pub async fn delete_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    match state.repo.delete_task(id).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound(id)),
    }
}

// The id segment arrives as a string; a non-numeric value is a validation
// error with path-level detail, not a routing miss.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::Validation(vec![FieldError::path(
            "id",
            "value is not a valid integer",
            "int_parsing",
        )])
    })
}
