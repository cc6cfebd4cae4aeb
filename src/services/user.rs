//! User service
//!
//! Registration, credential verification and the per-user game lists
//! (favourites, wishlist, played).

use serde::Serialize;
use std::sync::Arc;

use crate::db::repositories::{GameRepository, UserRepository};
use crate::models::{ListKind, User, UserProfile};
use crate::services::password::{hash_password, verify_password};

/// Errors from user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("username already exists")]
    UsernameTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error("game not found")]
    GameNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

/// Favourites and wishlist together, the response shape of every list
/// mutation.
#[derive(Debug, Serialize)]
pub struct UserLists {
    pub favourites: Vec<crate::models::Game>,
    pub wishlist: Vec<crate::models::Game>,
}

/// User service
pub struct UserService {
    users: Arc<dyn UserRepository>,
    games: Arc<dyn GameRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, games: Arc<dyn GameRepository>) -> Self {
        Self { users, games }
    }

    /// Register a new account with a hashed password.
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserServiceError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(UserServiceError::Validation(
                "username and password required".to_string(),
            ));
        }

        if self.users.get_by_username(&input.username).await?.is_some() {
            return Err(UserServiceError::UsernameTaken);
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.username, input.name, password_hash);
        Ok(self.users.create(&user).await?)
    }

    /// Verify a username/password pair.
    ///
    /// Unknown user and wrong password are deliberately indistinguishable.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, UserServiceError> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or(UserServiceError::InvalidCredentials)?;

        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(UserServiceError::InvalidCredentials)
        }
    }

    /// Look up a user by id.
    pub async fn get_user(&self, user_id: i64) -> Result<User, UserServiceError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(UserServiceError::UserNotFound)
    }

    /// A user's profile with populated favourites and wishlist.
    pub async fn profile(&self, user_id: i64) -> Result<UserProfile, UserServiceError> {
        let user = self.get_user(user_id).await?;
        let favourites = self
            .users
            .games_in_list(user_id, ListKind::Favourites)
            .await?;
        let wishlist = self.users.games_in_list(user_id, ListKind::Wishlist).await?;

        Ok(UserProfile {
            id: user.id,
            username: user.username,
            name: user.name,
            favourites,
            wishlist,
        })
    }

    /// Add a game to one of the user's lists; already-present is a no-op.
    pub async fn add_to_list(
        &self,
        user_id: i64,
        game_id: i64,
        list: ListKind,
    ) -> Result<UserLists, UserServiceError> {
        self.get_user(user_id).await?;
        if self.games.get_by_id(game_id).await?.is_none() {
            return Err(UserServiceError::GameNotFound);
        }

        self.users.add_to_list(user_id, game_id, list).await?;
        self.lists(user_id).await
    }

    /// Remove a game from one of the user's lists; absent is a no-op.
    pub async fn remove_from_list(
        &self,
        user_id: i64,
        game_id: i64,
        list: ListKind,
    ) -> Result<UserLists, UserServiceError> {
        self.get_user(user_id).await?;
        self.users.remove_from_list(user_id, game_id, list).await?;
        self.lists(user_id).await
    }

    async fn lists(&self, user_id: i64) -> Result<UserLists, UserServiceError> {
        Ok(UserLists {
            favourites: self
                .users
                .games_in_list(user_id, ListKind::Favourites)
                .await?,
            wishlist: self.users.games_in_list(user_id, ListKind::Wishlist).await?,
        })
    }
}
