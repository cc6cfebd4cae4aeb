//! Authentication API endpoints
//!
//! Handles HTTP requests for session authentication:
//! - POST /api/login - User login, issues the token cookie + CSRF nonce
//! - GET /api/login/auth/me - Get current user's profile
//! - POST /api/login/logout - User logout, clears the token cookie

use axum::{
    extract::{Extension, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, CurrentUser};
use crate::auth::{CSRF_HEADER, TOKEN_COOKIE};
use crate::models::UserProfile;
use crate::services::UserServiceError;

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Build public auth routes (no auth required)
///
/// Logout is public: a client whose token is expired or broken must
/// still be able to clear its cookie.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", post(login))
        .route("/logout", post(logout))
}

/// Build protected auth routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_current_user))
}

/// POST /api/login - User login
///
/// On success sets the HTTP-only `token` cookie, returns the CSRF nonce
/// in the `X-CSRF-Token` response header and the user's profile as the
/// body. The client must echo the nonce on every guarded request.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_service
        .authenticate(&body.username, &body.password)
        .await
        .map_err(|e| match e {
            UserServiceError::InvalidCredentials => {
                ApiError::unauthorized("invalid username or password")
            }
            _ => ApiError::internal_error("login failed"),
        })?;

    let issued = state
        .signer
        .issue(user.id, &user.username)
        .map_err(|e| ApiError::internal_error(format!("token issuance failed: {e}")))?;

    let mut cookie = format!("{TOKEN_COOKIE}={}; Path=/; HttpOnly", issued.token);
    if state.secure_cookies {
        cookie.push_str("; Secure");
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::internal_error(format!("invalid cookie value: {e}")))?,
    );
    headers.insert(
        CSRF_HEADER,
        HeaderValue::from_str(&issued.csrf)
            .map_err(|e| ApiError::internal_error(format!("invalid nonce value: {e}")))?,
    );

    let profile = state
        .user_service
        .profile(user.id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((headers, Json(profile)))
}

/// GET /api/login/auth/me - Get current user's profile
///
/// Requires authentication.
async fn get_current_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.user_service.profile(user.0).await.map_err(|e| match e {
        UserServiceError::UserNotFound => ApiError::unauthorized("invalid token"),
        _ => ApiError::internal_error(e.to_string()),
    })?;
    Ok(Json(profile))
}

/// POST /api/login/logout - User logout
///
/// Clears the token cookie. The token itself stays valid until expiry;
/// there is no server-side revocation store.
async fn logout() -> Result<impl IntoResponse, ApiError> {
    let clear_cookie = format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&clear_cookie)
            .map_err(|e| ApiError::internal_error(format!("invalid cookie value: {e}")))?,
    );

    Ok((headers, Json(serde_json::json!({ "message": "logged out" }))))
}
