//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User entity representing a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Optional display name
    pub name: Option<String>,
    /// Password hash (argon2, PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the given parameters.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password()`.
    pub fn new(username: String, name: Option<String>, password_hash: String) -> Self {
        Self {
            id: 0, // Will be set by the database
            username,
            name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Profile shape returned by login and `/auth/me`: the user plus their
/// populated game lists.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub favourites: Vec<super::Game>,
    pub wishlist: Vec<super::Game>,
}

/// Which per-user game list a membership row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Favourites,
    Wishlist,
    Played,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Favourites => write!(f, "favourites"),
            ListKind::Wishlist => write!(f, "wishlist"),
            ListKind::Played => write!(f, "played"),
        }
    }
}

impl FromStr for ListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "favourites" => Ok(ListKind::Favourites),
            "wishlist" => Ok(ListKind::Wishlist),
            "played" => Ok(ListKind::Played),
            _ => Err(anyhow::anyhow!("Invalid list kind: {}", s)),
        }
    }
}
