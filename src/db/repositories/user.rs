//! User repository
//!
//! Database operations for users and their per-user game lists
//! (favourites, wishlist, played).

use crate::models::{Game, ListKind, User};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use super::game::row_to_game;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: &User) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Add a game to one of the user's lists (idempotent)
    async fn add_to_list(&self, user_id: i64, game_id: i64, list: ListKind) -> Result<()>;

    /// Remove a game from one of the user's lists (idempotent)
    async fn remove_from_list(&self, user_id: i64, game_id: i64, list: ListKind) -> Result<()>;

    /// All games in one of the user's lists, most recently added first
    async fn games_in_list(&self, user_id: i64, list: ListKind) -> Result<Vec<Game>>;
}

/// SQLx-based user repository implementation
pub struct SqlxUserRepository {
    pool: SqlitePool,
}

impl SqlxUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, name, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create user")?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: user.username.clone(),
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get user by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row))),
            None => Ok(None),
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get user by username")?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row))),
            None => Ok(None),
        }
    }

    async fn add_to_list(&self, user_id: i64, game_id: i64, list: ListKind) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO user_game_lists (user_id, game_id, list, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(game_id)
        .bind(list.to_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to add game to {} list", list))?;

        Ok(())
    }

    async fn remove_from_list(&self, user_id: i64, game_id: i64, list: ListKind) -> Result<()> {
        sqlx::query("DELETE FROM user_game_lists WHERE user_id = ? AND game_id = ? AND list = ?")
            .bind(user_id)
            .bind(game_id)
            .bind(list.to_string())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to remove game from {} list", list))?;

        Ok(())
    }

    async fn games_in_list(&self, user_id: i64, list: ListKind) -> Result<Vec<Game>> {
        let rows = sqlx::query(
            r#"
            SELECT g.id, g.name, g.release_year, g.creator, g.genre, g.image,
                   g.description, g.rating, g.created_by, g.created_at
            FROM user_game_lists l
            JOIN games g ON g.id = l.game_id
            WHERE l.user_id = ? AND l.list = ?
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(list.to_string())
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to load {} list", list))?;

        rows.iter().map(row_to_game).collect()
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{GameRepository, SqlxGameRepository};
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> SqlitePool {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        pool
    }

    async fn insert_game(pool: &SqlitePool, user_id: i64, name: &str) -> Game {
        let repo = SqlxGameRepository::new(pool.clone());
        repo.create(&Game {
            id: 0,
            name: name.to_string(),
            release_year: 2020,
            creator: None,
            genre: vec!["RPG".to_string()],
            image: "https://example.com/g.png".to_string(),
            description: "desc".to_string(),
            rating: 0.0,
            created_by: user_id,
            created_at: Utc::now(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let pool = setup().await;
        let repo = SqlxUserRepository::new(pool);

        let user = User::new(
            "zelda_fan".to_string(),
            Some("Link".to_string()),
            "hash".to_string(),
        );
        let created = repo.create(&user).await.unwrap();
        assert!(created.id > 0);

        let by_name = repo.get_by_username("zelda_fan").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "zelda_fan");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = setup().await;
        let repo = SqlxUserRepository::new(pool);

        let user = User::new("dupe".to_string(), None, "hash".to_string());
        repo.create(&user).await.unwrap();
        assert!(repo.create(&user).await.is_err());
    }

    #[tokio::test]
    async fn test_list_membership_is_idempotent() {
        let pool = setup().await;
        let repo = SqlxUserRepository::new(pool.clone());

        let user = repo
            .create(&User::new("lister".to_string(), None, "hash".to_string()))
            .await
            .unwrap();
        let game = insert_game(&pool, user.id, "Hades").await;

        repo.add_to_list(user.id, game.id, ListKind::Favourites)
            .await
            .unwrap();
        repo.add_to_list(user.id, game.id, ListKind::Favourites)
            .await
            .unwrap();

        let favourites = repo
            .games_in_list(user.id, ListKind::Favourites)
            .await
            .unwrap();
        assert_eq!(favourites.len(), 1);
        assert_eq!(favourites[0].name, "Hades");
    }

    #[tokio::test]
    async fn test_lists_are_independent() {
        let pool = setup().await;
        let repo = SqlxUserRepository::new(pool.clone());

        let user = repo
            .create(&User::new("lister".to_string(), None, "hash".to_string()))
            .await
            .unwrap();
        let game = insert_game(&pool, user.id, "Hades").await;

        repo.add_to_list(user.id, game.id, ListKind::Wishlist)
            .await
            .unwrap();

        assert!(repo
            .games_in_list(user.id, ListKind::Favourites)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            repo.games_in_list(user.id, ListKind::Wishlist)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_remove_from_list() {
        let pool = setup().await;
        let repo = SqlxUserRepository::new(pool.clone());

        let user = repo
            .create(&User::new("lister".to_string(), None, "hash".to_string()))
            .await
            .unwrap();
        let game = insert_game(&pool, user.id, "Hades").await;

        repo.add_to_list(user.id, game.id, ListKind::Played)
            .await
            .unwrap();
        repo.remove_from_list(user.id, game.id, ListKind::Played)
            .await
            .unwrap();
        // Removing again is a no-op
        repo.remove_from_list(user.id, game.id, ListKind::Played)
            .await
            .unwrap();

        assert!(repo
            .games_in_list(user.id, ListKind::Played)
            .await
            .unwrap()
            .is_empty());
    }
}
