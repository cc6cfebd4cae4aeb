//! Business logic services
//!
//! Services sit between the API handlers and the repositories: they own
//! validation, ownership checks and cross-entity updates.

pub mod game;
pub mod password;
pub mod review;
pub mod user;
pub mod validation;

pub use game::{GameService, GameServiceError};
pub use review::{ReviewService, ReviewServiceError};
pub use user::{RegisterInput, UserLists, UserService, UserServiceError};
