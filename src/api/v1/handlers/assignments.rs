/*
 * Responsibility
 * - Assigning tasks to people, status updates, per-person task listing
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            assignments::{
                AssignTaskRequest, AssignmentResponse, UpdateTaskStatusRequest, UserTasksResponse,
            },
            tasks::TasksListResponse,
        },
        extractors::{
            JsonBody,
            authorized::{AssignTask, Authorized, ListUserTasks, UpdateTaskStatus},
        },
    },
    error::AppError,
    repos::{assignment_repo, person_repo, task_repo},
    state::AppState,
};

pub async fn assign_task(
    auth: Authorized<AssignTask>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AssignTaskRequest>,
) -> Result<(StatusCode, Json<TasksListResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("bad_request", msg))?;

    let row = assignment_repo::create(
        &state.db,
        req.person_id,
        req.task_id,
        req.start_date,
        req.due_by,
        req.status(),
    )
    .await?;

    tracing::info!(
        person_id = row.personid,
        task_id = row.taskid,
        assigned_by = auth.claims.sub().unwrap_or("unknown"),
        "task assigned"
    );

    let tasks = task_repo::list(&state.db).await?;
    Ok((StatusCode::CREATED, Json(TasksListResponse::new(tasks))))
}

pub async fn update_task_status(
    _auth: Authorized<UpdateTaskStatus>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateTaskStatusRequest>,
) -> Result<Json<TasksListResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("bad_request", msg))?;

    assignment_repo::update_status(
        &state.db,
        req.person_id,
        req.task_id,
        req.start_date,
        req.status(),
    )
    .await?
    .ok_or(AppError::not_found("assignment"))?;

    let tasks = task_repo::list(&state.db).await?;
    Ok(Json(TasksListResponse::new(tasks)))
}

pub async fn list_user_tasks(
    _auth: Authorized<ListUserTasks>,
    State(state): State<AppState>,
    Path(person_id): Path<i32>,
) -> Result<Json<UserTasksResponse>, AppError> {
    if !person_repo::exists(&state.db, person_id).await? {
        return Err(AppError::not_found("person"));
    }

    let rows = assignment_repo::list_for_person(&state.db, person_id).await?;

    Ok(Json(UserTasksResponse {
        success: true,
        user: person_id,
        user_tasks: rows.into_iter().map(AssignmentResponse::from).collect(),
    }))
}
