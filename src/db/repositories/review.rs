//! Review repository

use crate::models::Review;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Review repository trait
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review, returning it with its assigned id
    async fn create(&self, review: &Review) -> Result<Review>;

    /// All reviews for a game, newest first
    async fn list_by_game(&self, game_id: i64) -> Result<Vec<Review>>;

    /// Average rating across a game's reviews; None when it has none
    async fn average_rating(&self, game_id: i64) -> Result<Option<f64>>;
}

/// SQLx-based review repository implementation
pub struct SqlxReviewRepository {
    pool: SqlitePool,
}

impl SqlxReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn ReviewRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepository {
    async fn create(&self, review: &Review) -> Result<Review> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO reviews (rating, content, author_name, game_id, user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.rating)
        .bind(&review.content)
        .bind(&review.author_name)
        .bind(review.game)
        .bind(review.user_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create review")?;

        Ok(Review {
            id: result.last_insert_rowid(),
            created_at: now,
            ..review.clone()
        })
    }

    async fn list_by_game(&self, game_id: i64) -> Result<Vec<Review>> {
        let rows = sqlx::query(
            r#"
            SELECT id, rating, content, author_name, game_id, user_id, created_at
            FROM reviews
            WHERE game_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reviews")?;

        Ok(rows.iter().map(row_to_review).collect())
    }

    async fn average_rating(&self, game_id: i64) -> Result<Option<f64>> {
        let row = sqlx::query("SELECT AVG(rating) as avg_rating FROM reviews WHERE game_id = ?")
            .bind(game_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to compute average rating")?;

        Ok(row.get("avg_rating"))
    }
}

fn row_to_review(row: &sqlx::sqlite::SqliteRow) -> Review {
    Review {
        id: row.get("id"),
        rating: row.get("rating"),
        content: row.get("content"),
        author_name: row.get("author_name"),
        game: row.get("game_id"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}
