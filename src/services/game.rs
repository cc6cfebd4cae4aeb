//! Game service
//!
//! Catalog operations: listing, detail with reviews, validated creation
//! and owner-only updates.

use chrono::{Datelike, Utc};
use std::sync::Arc;

use crate::db::repositories::{GameRepository, ReviewRepository};
use crate::models::{Game, GameWithReviews, NewGame, UpdateGame};
use crate::services::validation;

/// Errors from game operations.
#[derive(Debug, thiserror::Error)]
pub enum GameServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("game not found")]
    NotFound,
    #[error("only the user who added this game can edit it")]
    NotOwner,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Game service
pub struct GameService {
    games: Arc<dyn GameRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl GameService {
    pub fn new(games: Arc<dyn GameRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { games, reviews }
    }

    /// All games, newest first.
    pub async fn list_games(&self) -> Result<Vec<Game>, GameServiceError> {
        Ok(self.games.list_all().await?)
    }

    /// A single game with its reviews.
    pub async fn get_game(&self, id: i64) -> Result<GameWithReviews, GameServiceError> {
        let game = self
            .games
            .get_by_id(id)
            .await?
            .ok_or(GameServiceError::NotFound)?;
        let reviews = self.reviews.list_by_game(id).await?;
        Ok(GameWithReviews { game, reviews })
    }

    /// Add a new game to the catalog, recorded against the submitting user.
    pub async fn add_game(&self, user_id: i64, input: NewGame) -> Result<Game, GameServiceError> {
        let creator = match &input.creator {
            Some(creator) if !validation::valid_string(creator, 1, 100) => {
                return Err(invalid_input());
            }
            Some(creator) => Some(creator.trim().to_string()),
            None => None,
        };

        let current_year = Utc::now().year();
        if !validation::valid_string(&input.name, 1, 100)
            || !validation::valid_number(input.release_year, 1972, current_year)
            || !validation::valid_genres(&input.genre)
            || !validation::valid_image_url(&input.image)
            || !validation::valid_string(&input.description, 1, 500)
        {
            return Err(invalid_input());
        }

        let game = Game {
            id: 0,
            name: input.name.trim().to_string(),
            release_year: input.release_year,
            creator,
            genre: input.genre,
            image: input.image.trim().to_string(),
            description: input.description.trim().to_string(),
            rating: 0.0,
            created_by: user_id,
            created_at: Utc::now(),
        };

        Ok(self.games.create(&game).await?)
    }

    /// Update a game's attributes. Only the user who added the game may
    /// edit it; every supplied field is validated with the same rules as
    /// creation.
    pub async fn update_game(
        &self,
        user_id: i64,
        game_id: i64,
        input: UpdateGame,
    ) -> Result<Game, GameServiceError> {
        let mut game = self
            .games
            .get_by_id(game_id)
            .await?
            .ok_or(GameServiceError::NotFound)?;

        if game.created_by != user_id {
            return Err(GameServiceError::NotOwner);
        }

        if input.is_empty() {
            return Err(invalid_input());
        }

        if let Some(name) = input.name {
            if !validation::valid_string(&name, 1, 100) {
                return Err(invalid_input());
            }
            game.name = name.trim().to_string();
        }
        if let Some(release_year) = input.release_year {
            if !validation::valid_number(release_year, 1972, Utc::now().year()) {
                return Err(invalid_input());
            }
            game.release_year = release_year;
        }
        if let Some(creator) = input.creator {
            if !validation::valid_string(&creator, 1, 100) {
                return Err(invalid_input());
            }
            game.creator = Some(creator.trim().to_string());
        }
        if let Some(genre) = input.genre {
            if !validation::valid_genres(&genre) {
                return Err(invalid_input());
            }
            game.genre = genre;
        }
        if let Some(image) = input.image {
            if !validation::valid_image_url(&image) {
                return Err(invalid_input());
            }
            game.image = image.trim().to_string();
        }
        if let Some(description) = input.description {
            if !validation::valid_string(&description, 1, 500) {
                return Err(invalid_input());
            }
            game.description = description.trim().to_string();
        }

        Ok(self.games.update(&game).await?)
    }
}

fn invalid_input() -> GameServiceError {
    GameServiceError::Validation("missing fields or wrong types".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxGameRepository, SqlxReviewRepository, SqlxUserRepository, UserRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;

    async fn setup() -> (GameService, i64, i64) {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();

        let users = SqlxUserRepository::new(pool.clone());
        let owner = users
            .create(&User::new("owner".to_string(), None, "hash".to_string()))
            .await
            .unwrap();
        let other = users
            .create(&User::new("other".to_string(), None, "hash".to_string()))
            .await
            .unwrap();

        let service = GameService::new(
            SqlxGameRepository::boxed(pool.clone()),
            SqlxReviewRepository::boxed(pool),
        );
        (service, owner.id, other.id)
    }

    fn new_game() -> NewGame {
        NewGame {
            name: "Hollow Knight".to_string(),
            release_year: 2017,
            creator: Some("Team Cherry".to_string()),
            genre: vec!["Metroidvania".to_string(), "Indie".to_string()],
            image: "https://example.com/hk.png".to_string(),
            description: "Bugs and shadows".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_game_valid() {
        let (service, owner, _) = setup().await;

        let game = service.add_game(owner, new_game()).await.unwrap();
        assert!(game.id > 0);
        assert_eq!(game.created_by, owner);
        assert_eq!(game.rating, 0.0);
    }

    #[tokio::test]
    async fn test_add_game_trims_fields() {
        let (service, owner, _) = setup().await;

        let mut input = new_game();
        input.name = "  Hollow Knight  ".to_string();
        let game = service.add_game(owner, input).await.unwrap();
        assert_eq!(game.name, "Hollow Knight");
    }

    #[tokio::test]
    async fn test_add_game_rejects_bad_fields() {
        let (service, owner, _) = setup().await;

        let mut input = new_game();
        input.release_year = 1950;
        assert!(matches!(
            service.add_game(owner, input).await,
            Err(GameServiceError::Validation(_))
        ));

        let mut input = new_game();
        input.genre = vec!["NotAGenre".to_string()];
        assert!(matches!(
            service.add_game(owner, input).await,
            Err(GameServiceError::Validation(_))
        ));

        let mut input = new_game();
        input.image = "https://example.com/hk.txt".to_string();
        assert!(matches!(
            service.add_game(owner, input).await,
            Err(GameServiceError::Validation(_))
        ));

        let mut input = new_game();
        input.creator = Some("   ".to_string());
        assert!(matches!(
            service.add_game(owner, input).await,
            Err(GameServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_game_with_reviews() {
        let (service, owner, _) = setup().await;
        let game = service.add_game(owner, new_game()).await.unwrap();

        let detail = service.get_game(game.id).await.unwrap();
        assert_eq!(detail.game.name, "Hollow Knight");
        assert!(detail.reviews.is_empty());

        assert!(matches!(
            service.get_game(999).await,
            Err(GameServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_game_owner_only() {
        let (service, owner, other) = setup().await;
        let game = service.add_game(owner, new_game()).await.unwrap();

        let update = UpdateGame {
            description: Some("Reworked description".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            service.update_game(other, game.id, update.clone()).await,
            Err(GameServiceError::NotOwner)
        ));

        let updated = service.update_game(owner, game.id, update).await.unwrap();
        assert_eq!(updated.description, "Reworked description");
    }

    #[tokio::test]
    async fn test_update_game_rejects_empty_update() {
        let (service, owner, _) = setup().await;
        let game = service.add_game(owner, new_game()).await.unwrap();

        assert!(matches!(
            service
                .update_game(owner, game.id, UpdateGame::default())
                .await,
            Err(GameServiceError::Validation(_))
        ));
    }
}
