/*
 * Responsibility
 * - /tasks handlers
 * - Each handler names its permission through Authorized<P>; the gate runs before the body is read
 * - Mutations answer with the refreshed task list
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::tasks::{FoundResponse, TaskRequest, TasksListResponse},
        extractors::{
            JsonBody,
            authorized::{AddTask, AnyPermission, Authorized, DeleteTask, ListAllTasks},
        },
    },
    error::AppError,
    repos::task_repo,
    state::AppState,
};

async fn task_list(state: &AppState) -> Result<TasksListResponse, AppError> {
    let rows = task_repo::list(&state.db).await?;
    Ok(TasksListResponse::new(rows))
}

pub async fn list_tasks(
    _auth: Authorized<ListAllTasks>,
    State(state): State<AppState>,
) -> Result<Json<TasksListResponse>, AppError> {
    Ok(Json(task_list(&state).await?))
}

pub async fn create_task(
    _auth: Authorized<AddTask>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TaskRequest>,
) -> Result<(StatusCode, Json<TasksListResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("bad_request", msg))?;

    let row = task_repo::create(&state.db, req.description.trim()).await?;
    tracing::info!(task_id = row.id, "task created");

    Ok((StatusCode::CREATED, Json(task_list(&state).await?)))
}

pub async fn delete_task(
    _auth: Authorized<DeleteTask>,
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
) -> Result<Json<TasksListResponse>, AppError> {
    if !task_repo::delete(&state.db, task_id).await? {
        return Err(AppError::not_found("task"));
    }
    tracing::info!(task_id, "task deleted");

    Ok(Json(task_list(&state).await?))
}

pub async fn find_task(
    _auth: Authorized<AnyPermission>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TaskRequest>,
) -> Result<Json<FoundResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("bad_request", msg))?;

    let row = task_repo::find_by_description(&state.db, req.description.trim())
        .await?
        .ok_or(AppError::not_found("task"))?;

    Ok(Json(FoundResponse::new(row.id)))
}
