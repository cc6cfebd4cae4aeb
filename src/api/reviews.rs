//! Review API endpoints
//!
//! - POST /api/reviews - Add a review (guarded)

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, CurrentUser};
use crate::models::NewReview;
use crate::services::{ReviewServiceError, UserServiceError};

/// Build protected review routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/", post(create_review))
}

/// POST /api/reviews - Add a review for a game
///
/// Creates the review under the caller's username, marks the game as
/// played for them and updates the game's average rating.
async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewReview>,
) -> Result<impl IntoResponse, ApiError> {
    let author = state.user_service.get_user(user.0).await.map_err(|e| match e {
        UserServiceError::UserNotFound => ApiError::unauthorized("invalid token"),
        _ => ApiError::internal_error(e.to_string()),
    })?;

    let review = state
        .review_service
        .add_review(&author, body)
        .await
        .map_err(|e| match e {
            ReviewServiceError::Validation(msg) => ApiError::validation_error(msg),
            ReviewServiceError::GameNotFound => ApiError::not_found("game not found"),
            ReviewServiceError::Internal(e) => ApiError::internal_error(e.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(review)))
}
