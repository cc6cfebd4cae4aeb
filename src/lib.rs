//! GameBoxd - a social cataloging backend for video games
//!
//! A JSON REST service where users catalog games, review them and keep
//! favourites, wishlist and played lists. Sessions are stateless: an
//! HMAC-signed token in an HTTP-only cookie paired with a double-submit
//! CSRF nonce, so no session store is needed.
//!
//! # Architecture
//!
//! - `api` - HTTP handlers, routing and the authentication guard
//! - `auth` - token signing, verification and the CSRF nonce
//! - `config` - YAML + environment configuration
//! - `db` - SQLite pool, migrations and repositories
//! - `models` - domain types
//! - `services` - business logic between the API and the repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
