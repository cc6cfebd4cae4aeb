//! Game repository
//!
//! Database operations for the game catalog. Genres are stored as a JSON
//! array string in a single column.

use crate::models::Game;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Game repository trait
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Insert a new game, returning it with its assigned id
    async fn create(&self, game: &Game) -> Result<Game>;

    /// Get game by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Game>>;

    /// List all games, newest first
    async fn list_all(&self) -> Result<Vec<Game>>;

    /// Update a game's editable fields
    async fn update(&self, game: &Game) -> Result<Game>;

    /// Overwrite a game's average rating
    async fn set_rating(&self, id: i64, rating: f64) -> Result<()>;
}

/// SQLx-based game repository implementation
pub struct SqlxGameRepository {
    pool: SqlitePool,
}

impl SqlxGameRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn GameRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl GameRepository for SqlxGameRepository {
    async fn create(&self, game: &Game) -> Result<Game> {
        let now = Utc::now();
        let genre_json =
            serde_json::to_string(&game.genre).context("Failed to serialize genres")?;

        let result = sqlx::query(
            r#"
            INSERT INTO games (name, release_year, creator, genre, image, description, rating, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&game.name)
        .bind(game.release_year)
        .bind(&game.creator)
        .bind(&genre_json)
        .bind(&game.image)
        .bind(&game.description)
        .bind(game.rating)
        .bind(game.created_by)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create game")?;

        let id = result.last_insert_rowid();

        Ok(Game {
            id,
            created_at: now,
            ..game.clone()
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Game>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, release_year, creator, genre, image, description, rating, created_by, created_at
            FROM games
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get game by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_game(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Game>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, release_year, creator, genre, image, description, rating, created_by, created_at
            FROM games
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list games")?;

        rows.iter().map(row_to_game).collect()
    }

    async fn update(&self, game: &Game) -> Result<Game> {
        let genre_json =
            serde_json::to_string(&game.genre).context("Failed to serialize genres")?;

        sqlx::query(
            r#"
            UPDATE games
            SET name = ?, release_year = ?, creator = ?, genre = ?, image = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&game.name)
        .bind(game.release_year)
        .bind(&game.creator)
        .bind(&genre_json)
        .bind(&game.image)
        .bind(&game.description)
        .bind(game.id)
        .execute(&self.pool)
        .await
        .context("Failed to update game")?;

        self.get_by_id(game.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Game not found after update"))
    }

    async fn set_rating(&self, id: i64, rating: f64) -> Result<()> {
        sqlx::query("UPDATE games SET rating = ? WHERE id = ?")
            .bind(rating)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update game rating")?;

        Ok(())
    }
}

/// Map a database row to a Game. Shared with the user repository, which
/// joins games when populating per-user lists.
pub(crate) fn row_to_game(row: &sqlx::sqlite::SqliteRow) -> Result<Game> {
    let genre_json: String = row.get("genre");
    let genre: Vec<String> = serde_json::from_str(&genre_json)
        .with_context(|| format!("Invalid genre column in database: {}", genre_json))?;

    Ok(Game {
        id: row.get("id"),
        name: row.get("name"),
        release_year: row.get("release_year"),
        creator: row.get("creator"),
        genre,
        image: row.get("image"),
        description: row.get("description"),
        rating: row.get("rating"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;

    async fn setup() -> (SqlitePool, i64) {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();

        let user = User::new("adder".to_string(), None, "hash".to_string());
        let result = sqlx::query(
            "INSERT INTO users (username, name, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&pool)
        .await
        .unwrap();

        (pool, result.last_insert_rowid())
    }

    fn sample_game(created_by: i64) -> Game {
        Game {
            id: 0,
            name: "Outer Wilds".to_string(),
            release_year: 2019,
            creator: Some("Mobius Digital".to_string()),
            genre: vec!["Aventura".to_string(), "Indie".to_string()],
            image: "https://example.com/ow.png".to_string(),
            description: "A solar system time loop".to_string(),
            rating: 0.0,
            created_by,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_game() {
        let (pool, user_id) = setup().await;
        let repo = SqlxGameRepository::new(pool);

        let created = repo.create(&sample_game(user_id)).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Outer Wilds");
        assert_eq!(fetched.genre, vec!["Aventura", "Indie"]);
        assert_eq!(fetched.created_by, user_id);
    }

    #[tokio::test]
    async fn test_get_missing_game_returns_none() {
        let (pool, _) = setup().await;
        let repo = SqlxGameRepository::new(pool);
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let (pool, user_id) = setup().await;
        let repo = SqlxGameRepository::new(pool);

        let mut first = sample_game(user_id);
        first.name = "First".to_string();
        let mut second = sample_game(user_id);
        second.name = "Second".to_string();

        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        let games = repo.list_all().await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "Second");
        assert_eq!(games[1].name, "First");
    }

    #[tokio::test]
    async fn test_update_game() {
        let (pool, user_id) = setup().await;
        let repo = SqlxGameRepository::new(pool);

        let mut game = repo.create(&sample_game(user_id)).await.unwrap();
        game.description = "Updated description".to_string();

        let updated = repo.update(&game).await.unwrap();
        assert_eq!(updated.description, "Updated description");
    }

    #[tokio::test]
    async fn test_set_rating() {
        let (pool, user_id) = setup().await;
        let repo = SqlxGameRepository::new(pool);

        let game = repo.create(&sample_game(user_id)).await.unwrap();
        repo.set_rating(game.id, 4.5).await.unwrap();

        let fetched = repo.get_by_id(game.id).await.unwrap().unwrap();
        assert_eq!(fetched.rating, 4.5);
    }
}
