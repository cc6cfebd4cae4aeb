//! Review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's review of a game.
///
/// The author's username is denormalized into the review so the detail
/// page can render without a join against users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier
    pub id: i64,
    /// Rating in half-point steps, 0.0 to 5.0
    pub rating: f64,
    /// Review text
    pub content: String,
    /// Username of the author at review time
    pub author_name: String,
    /// Reviewed game
    pub game: i64,
    /// Authoring user
    #[serde(skip_serializing)]
    pub user_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a review.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    /// Reviewed game id
    pub game: i64,
    pub rating: f64,
    pub content: String,
}
