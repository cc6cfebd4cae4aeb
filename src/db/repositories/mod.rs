//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod game;
pub mod review;
pub mod user;

pub use game::{GameRepository, SqlxGameRepository};
pub use review::{ReviewRepository, SqlxReviewRepository};
pub use user::{SqlxUserRepository, UserRepository};
