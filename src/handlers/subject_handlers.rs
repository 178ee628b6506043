use super::user_handlers::{invalid_json, parse_id, path_id};
use crate::error::{AppError, Result};
use crate::models::{
    CreateSubjectRequest, DeleteSubjectQuery, MessageResponse, UpdateSubjectRequest,
};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

type UserPath = std::result::Result<Path<String>, PathRejection>;
type SubjectPath = std::result::Result<Path<(String, String)>, PathRejection>;

fn user_id_from(path: UserPath) -> Result<i64> {
    path_id(path).ok_or_else(|| AppError::NotFound("Non-numeric user id".to_string()))
}

/// Both ids of a nested subject path, `None` if either is not an integer.
fn subject_ids(path: SubjectPath) -> Option<(i64, i64)> {
    let Path((raw_user_id, raw_subject_id)) = path.ok()?;
    Some((parse_id(&raw_user_id)?, parse_id(&raw_subject_id)?))
}

fn subject_ids_from(path: SubjectPath) -> Result<(i64, i64)> {
    subject_ids(path).ok_or_else(|| AppError::NotFound("Non-numeric id".to_string()))
}

/// GET /subjects
pub async fn list_subjects(State(state): State<AppState>) -> Result<Response> {
    let subjects = state.subject_service.list_subjects().await?;
    Ok(Json(subjects).into_response())
}

/// GET /users/{user_id}/subjects
pub async fn list_user_subjects(
    State(state): State<AppState>,
    path: UserPath,
) -> Result<Response> {
    let user_id = user_id_from(path)?;
    let subjects = state.subject_service.list_for_user(user_id).await?;
    Ok(Json(subjects).into_response())
}

/// POST /users/{user_id}/subjects
pub async fn create_subject(
    State(state): State<AppState>,
    path: UserPath,
    payload: std::result::Result<Json<CreateSubjectRequest>, JsonRejection>,
) -> Result<Response> {
    let user_id = user_id_from(path)?;
    let Json(request) = payload.map_err(invalid_json)?;

    let subject = state
        .subject_service
        .create_subject(user_id, &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(subject)).into_response())
}

/// GET /users/{user_id}/subjects/{subject_id}
pub async fn get_subject(State(state): State<AppState>, path: SubjectPath) -> Result<Response> {
    let (user_id, subject_id) = subject_ids_from(path)?;

    let subject = state
        .subject_service
        .get_subject_for_user(user_id, subject_id)
        .await?;
    Ok(Json(subject).into_response())
}

/// PUT /users/{user_id}/subjects/{subject_id}
pub async fn update_subject(
    State(state): State<AppState>,
    path: SubjectPath,
    payload: std::result::Result<Json<UpdateSubjectRequest>, JsonRejection>,
) -> Result<Response> {
    let (user_id, subject_id) =
        subject_ids(path).ok_or_else(|| AppError::Validation("Invalid id".to_string()))?;
    let Json(request) = payload.map_err(invalid_json)?;

    let subject = state
        .subject_service
        .rename_subject(user_id, subject_id, &request.name)
        .await?;
    Ok(Json(subject).into_response())
}

/// DELETE /users/{user_id}/subjects/{subject_id}
pub async fn delete_subject(
    State(state): State<AppState>,
    path: SubjectPath,
) -> Result<Response> {
    let (user_id, subject_id) = subject_ids_from(path)?;

    state
        .subject_service
        .delete_subject(user_id, subject_id)
        .await?;
    Ok(Json(MessageResponse::new("Subject deleted successfully")).into_response())
}

/// DELETE /users/{user_id}/subjects?name=...
pub async fn delete_subject_by_name(
    State(state): State<AppState>,
    path: UserPath,
    query: std::result::Result<Query<DeleteSubjectQuery>, QueryRejection>,
) -> Result<Response> {
    let user_id = user_id_from(path)?;
    let Query(query) = query.map_err(|rejection| {
        AppError::Validation(format!("Invalid query string: {}", rejection.body_text()))
    })?;

    state
        .subject_service
        .delete_subject_by_name(user_id, &query.name)
        .await?;
    Ok(Json(MessageResponse::new("Subject deleted successfully")).into_response())
}
