//! GameBoxd - a social cataloging backend for video games

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gameboxd::{
    api::{self, AppState},
    auth::TokenSigner,
    config::Config,
    db::{
        self,
        repositories::{SqlxGameRepository, SqlxReviewRepository, SqlxUserRepository},
    },
    services::{GameService, ReviewService, UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameboxd=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GameBoxd...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let game_repo = SqlxGameRepository::boxed(pool.clone());
    let review_repo = SqlxReviewRepository::boxed(pool.clone());

    // Initialize services
    let user_service = Arc::new(UserService::new(user_repo.clone(), game_repo.clone()));
    let game_service = Arc::new(GameService::new(game_repo.clone(), review_repo.clone()));
    let review_service = Arc::new(ReviewService::new(review_repo, game_repo, user_repo));

    // Build application state
    let state = AppState {
        signer: Arc::new(TokenSigner::new(&config.auth.token_secret)),
        user_service,
        game_service,
        review_service,
        secure_cookies: config.auth.secure_cookies,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
