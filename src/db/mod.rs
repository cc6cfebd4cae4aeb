//! Database layer
//!
//! SQLite persistence for the catalog, accessed through repository traits
//! so services never touch SQL directly. Migrations are embedded in the
//! binary and run at startup.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
