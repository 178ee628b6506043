use crate::error::{AppError, Result};
use crate::models::{CreateUserRequest, CreateUserResponse, MessageResponse, UpdateUserRequest};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

/// Parses a path id; `None` when it is not an integer.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

/// A path segment axum could not extract (e.g. invalid UTF-8) counts as
/// non-numeric.
pub(crate) fn path_id(path: std::result::Result<Path<String>, PathRejection>) -> Option<i64> {
    let Path(raw) = path.ok()?;
    parse_id(&raw)
}

pub(crate) fn invalid_json(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
}

fn non_numeric_id() -> AppError {
    AppError::NotFound("Non-numeric id".to_string())
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Response> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users).into_response())
}

/// GET /users/{id}
///
/// A non-numeric id is answered like a missing user.
pub async fn get_user(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let id = path_id(path).ok_or_else(non_numeric_id)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user).into_response())
}

/// POST /users
///
/// Responds with the freshly stored row. If it cannot be read back the
/// insert still happened, so a 201 acknowledgment is returned instead.
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(invalid_json)?;
    let username = request.username.trim().to_string();
    let email = request.email.trim().to_string();

    let id = state.user_service.create_user(request).await?;

    match state.user_service.get_user(id).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user)).into_response()),
        Err(e) => {
            tracing::warn!(user_id = id, "Created user could not be re-fetched: {}", e);
            let ack = CreateUserResponse {
                id,
                username,
                email,
                created: true,
                message: None,
            };
            Ok((StatusCode::CREATED, Json(ack)).into_response())
        }
    }
}

/// POST /api/users
///
/// Registration endpoint: same validation as `POST /users`, answered with a
/// creation acknowledgment rather than the stored row.
pub async fn register_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(invalid_json)?;
    let username = request.username.trim().to_string();
    let email = request.email.trim().to_string();

    let id = state.user_service.create_user(request).await?;

    let response = CreateUserResponse {
        id,
        username,
        email,
        created: true,
        message: Some("User created successfully".to_string()),
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Response> {
    let id = path_id(path)
        .ok_or_else(|| AppError::Validation("Invalid user id".to_string()))?;
    let Json(request) = payload.map_err(invalid_json)?;

    let user = state.user_service.update_user(id, request).await?;
    Ok(Json(user).into_response())
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let id = path_id(path).ok_or_else(non_numeric_id)?;
    state.user_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")).into_response())
}
