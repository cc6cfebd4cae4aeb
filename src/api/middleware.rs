//! API middleware
//!
//! Shared application state, the JSON error shape used by every
//! endpoint, and the authentication guard.
//!
//! The guard accepts a request only when the signed token cookie
//! verifies AND the `X-CSRF-Token` header echoes the nonce embedded in
//! that token. A cross-site request can make the browser attach the
//! cookie but cannot read the nonce to set the header, so forged
//! requests fail here.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{TokenSigner, CSRF_HEADER, TOKEN_COOKIE};
use crate::services::{GameService, ReviewService, UserService};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub signer: Arc<TokenSigner>,
    pub user_service: Arc<UserService>,
    pub game_service: Arc<GameService>,
    pub review_service: Arc<ReviewService>,
    /// Set the `Secure` attribute on the token cookie.
    pub secure_cookies: bool,
}

/// Authenticated user id extracted from the verified token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

/// Error response for API errors
///
/// Serializes to the flat shape `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Extract the token cookie value from request headers.
fn extract_token_cookie(headers: &axum::http::HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookie_header.split(';') {
        if let Some(value) = cookie.trim().strip_prefix(&format!("{TOKEN_COOKIE}=")) {
            return Some(value.to_string());
        }
    }
    None
}

/// Authentication middleware
///
/// Rejects with 401 `missing token` when the cookie is absent and 401
/// `invalid token` for every other failure (bad signature, expired,
/// wrong or missing CSRF header). On success the user's id is stored in
/// request extensions as [`CurrentUser`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_cookie(request.headers())
        .ok_or_else(|| ApiError::unauthorized("missing token"))?;

    let claims = state
        .signer
        .verify(&token)
        .map_err(|_| ApiError::unauthorized("invalid token"))?;

    let csrf_header = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("invalid token"))?;
    if csrf_header != claims.csrf {
        return Err(ApiError::unauthorized("invalid token"));
    }

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| ApiError::unauthorized("invalid token"))?;

    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}
