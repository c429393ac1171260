use crate::{AppState, errors::AppError};
use axum::{Json, extract::State};

/// GET /health
/// Response: 200 OK with JSON once the database answers
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.posts.ping().await?;

    Ok(Json(serde_json::json!({
      "status": "healthy"
    })))
}
