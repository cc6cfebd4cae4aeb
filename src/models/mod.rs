//! Domain models
//!
//! Entities for the GameBoxd catalog: users, games and reviews.

pub mod game;
pub mod review;
pub mod user;

pub use game::{Game, GameWithReviews, NewGame, UpdateGame};
pub use review::{NewReview, Review};
pub use user::{ListKind, User, UserProfile};
