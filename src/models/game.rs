//! Game model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Review;

/// Game entity in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier
    pub id: i64,
    /// Game title
    pub name: String,
    /// Year of first release
    pub release_year: i32,
    /// Studio or developer (optional)
    pub creator: Option<String>,
    /// Genres, a non-empty subset of the genre catalog
    pub genre: Vec<String>,
    /// Cover image URL
    pub image: String,
    /// Short description
    pub description: String,
    /// Average review rating, rounded to 2 decimals
    pub rating: f64,
    /// User who added the game to the catalog
    pub created_by: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A game together with its reviews, as returned by the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GameWithReviews {
    #[serde(flatten)]
    pub game: Game,
    pub reviews: Vec<Review>,
}

/// Validated input for adding a game.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub release_year: i32,
    pub creator: Option<String>,
    pub genre: Vec<String>,
    pub image: String,
    pub description: String,
}

/// Partial update for a game; every field optional, at least one required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGame {
    pub name: Option<String>,
    pub release_year: Option<i32>,
    pub creator: Option<String>,
    pub genre: Option<Vec<String>>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl UpdateGame {
    /// An update with no fields set is rejected at the API boundary.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.release_year.is_none()
            && self.creator.is_none()
            && self.genre.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_game_is_empty() {
        assert!(UpdateGame::default().is_empty());

        let update = UpdateGame {
            name: Some("Hollow Knight".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_game_with_reviews_flattens() {
        let game = Game {
            id: 1,
            name: "Celeste".to_string(),
            release_year: 2018,
            creator: None,
            genre: vec!["Plataforma".to_string()],
            image: "https://example.com/celeste.png".to_string(),
            description: "Climb the mountain".to_string(),
            rating: 0.0,
            created_by: 1,
            created_at: Utc::now(),
        };
        let with_reviews = GameWithReviews {
            game,
            reviews: vec![],
        };
        let json = serde_json::to_value(&with_reviews).unwrap();
        assert_eq!(json["name"], "Celeste");
        assert!(json["reviews"].as_array().unwrap().is_empty());
    }
}
