//! Review service
//!
//! Creating reviews and keeping each game's average rating current.
//! Writing a review also marks the game as played for the author.

use chrono::Utc;
use std::sync::Arc;

use crate::db::repositories::{GameRepository, ReviewRepository, UserRepository};
use crate::models::{ListKind, NewReview, Review, User};
use crate::services::validation;

/// Errors from review operations.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("game not found")]
    GameNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Review service
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    games: Arc<dyn GameRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        games: Arc<dyn GameRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            reviews,
            games,
            users,
        }
    }

    /// Add a review for a game.
    ///
    /// On success the game lands on the author's played list and the
    /// game's average rating is recomputed, rounded to 2 decimals.
    pub async fn add_review(
        &self,
        author: &User,
        input: NewReview,
    ) -> Result<Review, ReviewServiceError> {
        let game = self
            .games
            .get_by_id(input.game)
            .await?
            .ok_or(ReviewServiceError::GameNotFound)?;

        if !validation::valid_rating(input.rating)
            || !validation::valid_string(&input.content, 1, 1000)
        {
            return Err(ReviewServiceError::Validation(
                "missing fields or wrong types".to_string(),
            ));
        }

        let review = self
            .reviews
            .create(&Review {
                id: 0,
                rating: input.rating,
                content: input.content.trim().to_string(),
                author_name: author.username.clone(),
                game: game.id,
                user_id: author.id,
                created_at: Utc::now(),
            })
            .await?;

        self.users
            .add_to_list(author.id, game.id, ListKind::Played)
            .await?;

        if let Some(average) = self.reviews.average_rating(game.id).await? {
            self.games
                .set_rating(game.id, (average * 100.0).round() / 100.0)
                .await?;
        }

        Ok(review)
    }
}
