use crate::models::MessageResponse;
use axum::response::Json;

/// GET /
pub async fn index_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the main endpoint"))
}

/// GET /welcome
pub async fn welcome_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome, Sir!"))
}
