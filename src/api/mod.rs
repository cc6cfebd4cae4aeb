//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints:
//! - Auth endpoints (login, me, logout)
//! - Registration endpoint
//! - Game catalog endpoints
//! - Review endpoints
//! - User list endpoints (favourites, wishlist, played)
//!
//! Mutating routes sit behind the cookie + CSRF guard in
//! [`middleware::require_auth`].

pub mod auth;
pub mod games;
pub mod middleware;
pub mod reviews;
pub mod users;


use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, CurrentUser};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Protected routes (need the token cookie + CSRF header)
    let protected_routes = Router::new()
        .nest("/login", auth::protected_router())
        .nest("/games", games::protected_router())
        .nest("/reviews", reviews::protected_router())
        .nest("/users", users::protected_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .nest("/login", auth::public_router())
        .nest("/register", users::register_router())
        .nest("/games", games::public_router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    // CORS configuration - credentials allowed so the token cookie flows
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173")),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::COOKIE,
            header::HeaderName::from_static(crate::auth::CSRF_HEADER),
        ])
        .expose_headers([header::HeaderName::from_static(crate::auth::CSRF_HEADER)])
        .allow_credentials(true);

    Router::new()
        .nest("/api", build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
