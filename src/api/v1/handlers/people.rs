/*
 * Responsibility
 * - /people handlers (list, add, delete, find)
 * - (name, ssn) identifies a person; duplicates are 422
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            people::{PeopleListResponse, PersonRequest},
            tasks::FoundResponse,
        },
        extractors::{
            JsonBody,
            authorized::{AddPerson, AnyPermission, Authorized, DeletePerson, ListAllPeople},
        },
    },
    error::AppError,
    repos::person_repo,
    state::AppState,
};

async fn people_list(state: &AppState) -> Result<PeopleListResponse, AppError> {
    let rows = person_repo::list(&state.db).await?;
    Ok(PeopleListResponse::new(rows))
}

pub async fn list_people(
    _auth: Authorized<ListAllPeople>,
    State(state): State<AppState>,
) -> Result<Json<PeopleListResponse>, AppError> {
    Ok(Json(people_list(&state).await?))
}

pub async fn create_person(
    _auth: Authorized<AddPerson>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PersonRequest>,
) -> Result<(StatusCode, Json<PeopleListResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("bad_request", msg))?;

    let row = person_repo::create(&state.db, req.name.trim(), req.ssn.trim()).await?;
    tracing::info!(person_id = row.id, "person created");

    Ok((StatusCode::CREATED, Json(people_list(&state).await?)))
}

pub async fn delete_person(
    _auth: Authorized<DeletePerson>,
    State(state): State<AppState>,
    Path(person_id): Path<i32>,
) -> Result<Json<PeopleListResponse>, AppError> {
    if !person_repo::delete(&state.db, person_id).await? {
        return Err(AppError::not_found("person"));
    }
    tracing::info!(person_id, "person deleted");

    Ok(Json(people_list(&state).await?))
}

pub async fn find_person(
    _auth: Authorized<AnyPermission>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PersonRequest>,
) -> Result<Json<FoundResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("bad_request", msg))?;

    let row = person_repo::find(&state.db, req.name.trim(), req.ssn.trim())
        .await?
        .ok_or(AppError::not_found("person"))?;

    Ok(Json(FoundResponse::new(row.id)))
}
