//! Game API endpoints
//!
//! - GET /api/games - List all games
//! - GET /api/games/:id - Get one game with its reviews
//! - POST /api/games - Add a game (guarded)
//! - PUT /api/games/:id - Edit a game, owner only (guarded)

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, CurrentUser};
use crate::models::{Game, GameWithReviews, NewGame, UpdateGame};
use crate::services::GameServiceError;

/// Build public game routes
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_games))
        .route("/{id}", get(get_game))
}

/// Build protected game routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game))
        .route("/{id}", put(update_game))
}

fn map_error(e: GameServiceError) -> ApiError {
    match e {
        GameServiceError::Validation(msg) => ApiError::validation_error(msg),
        GameServiceError::NotFound => ApiError::not_found("game not found"),
        GameServiceError::NotOwner => {
            ApiError::unauthorized("only the user who added this game can edit it")
        }
        GameServiceError::Internal(e) => ApiError::internal_error(e.to_string()),
    }
}

/// GET /api/games - List all games, newest first
async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.game_service.list_games().await.map_err(map_error)?;
    Ok(Json(games))
}

/// GET /api/games/:id - Get one game with its reviews
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GameWithReviews>, ApiError> {
    let game = state.game_service.get_game(id).await.map_err(map_error)?;
    Ok(Json(game))
}

/// POST /api/games - Add a game to the catalog
///
/// Requires authentication; the game is recorded under the caller.
async fn create_game(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewGame>,
) -> Result<impl IntoResponse, ApiError> {
    let game = state
        .game_service
        .add_game(user.0, body)
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// PUT /api/games/:id - Edit a game
///
/// Requires authentication; only the user who added the game may edit it.
async fn update_game(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateGame>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .game_service
        .update_game(user.0, id, body)
        .await
        .map_err(map_error)?;
    Ok(Json(game))
}
