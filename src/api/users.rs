//! User API endpoints
//!
//! - POST /api/register - Create an account
//! - POST /api/users/favorites|wishlist|played - Add a game to a list (guarded)
//! - DELETE /api/users/favorites|wishlist|played/:gameId - Remove (guarded)
//!
//! List mutations are idempotent and respond with the user's refreshed
//! favourites and wishlist.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, CurrentUser};
use crate::models::ListKind;
use crate::services::{RegisterInput, UserLists, UserServiceError};

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

/// Response for a created account
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

/// Request body for list additions
#[derive(Debug, Deserialize)]
pub struct AddToListRequest {
    #[serde(rename = "gameId")]
    pub game_id: i64,
}

/// Build the registration router
pub fn register_router() -> Router<AppState> {
    Router::new().route("/", post(register))
}

/// Build protected user-list routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/favorites", post(add_favourite))
        .route("/favorites/{game_id}", delete(remove_favourite))
        .route("/wishlist", post(add_wishlist))
        .route("/wishlist/{game_id}", delete(remove_wishlist))
        .route("/played", post(add_played))
        .route("/played/{game_id}", delete(remove_played))
}

fn map_error(e: UserServiceError) -> ApiError {
    match e {
        UserServiceError::Validation(msg) => ApiError::validation_error(msg),
        UserServiceError::UsernameTaken => ApiError::conflict("username already exists"),
        UserServiceError::InvalidCredentials => {
            ApiError::unauthorized("invalid username or password")
        }
        UserServiceError::UserNotFound => ApiError::unauthorized("invalid token"),
        UserServiceError::GameNotFound => ApiError::not_found("game not found"),
        UserServiceError::Internal(e) => ApiError::internal_error(e.to_string()),
    }
}

/// POST /api/register - Create an account
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_service
        .register(RegisterInput {
            username: body.username,
            name: body.name,
            password: body.password,
        })
        .await
        .map_err(map_error)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
            name: user.name,
        }),
    ))
}

async fn add_to_list(
    state: AppState,
    user: CurrentUser,
    list: ListKind,
    body: AddToListRequest,
) -> Result<Json<UserLists>, ApiError> {
    let lists = state
        .user_service
        .add_to_list(user.0, body.game_id, list)
        .await
        .map_err(map_error)?;
    Ok(Json(lists))
}

async fn remove_from_list(
    state: AppState,
    user: CurrentUser,
    list: ListKind,
    game_id: i64,
) -> Result<Json<UserLists>, ApiError> {
    let lists = state
        .user_service
        .remove_from_list(user.0, game_id, list)
        .await
        .map_err(map_error)?;
    Ok(Json(lists))
}

/// POST /api/users/favorites - Add a game to favourites
async fn add_favourite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<AddToListRequest>,
) -> Result<Json<UserLists>, ApiError> {
    add_to_list(state, user, ListKind::Favourites, body).await
}

/// DELETE /api/users/favorites/:gameId - Remove a game from favourites
async fn remove_favourite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(game_id): Path<i64>,
) -> Result<Json<UserLists>, ApiError> {
    remove_from_list(state, user, ListKind::Favourites, game_id).await
}

/// POST /api/users/wishlist - Add a game to the wishlist
async fn add_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<AddToListRequest>,
) -> Result<Json<UserLists>, ApiError> {
    add_to_list(state, user, ListKind::Wishlist, body).await
}

/// DELETE /api/users/wishlist/:gameId - Remove a game from the wishlist
async fn remove_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(game_id): Path<i64>,
) -> Result<Json<UserLists>, ApiError> {
    remove_from_list(state, user, ListKind::Wishlist, game_id).await
}

/// POST /api/users/played - Mark a game as played
async fn add_played(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<AddToListRequest>,
) -> Result<Json<UserLists>, ApiError> {
    add_to_list(state, user, ListKind::Played, body).await
}

/// DELETE /api/users/played/:gameId - Unmark a game as played
async fn remove_played(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(game_id): Path<i64>,
) -> Result<Json<UserLists>, ApiError> {
    remove_from_list(state, user, ListKind::Played, game_id).await
}
