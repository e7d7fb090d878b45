//! SQLite storage implementation for Taxonomist.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the `ContentBackend` trait defined in `taxonomist-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations, including the default taxonomy registrations
//! - The content backend and seed import
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!  storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

pub mod taxonomies;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use taxonomies::SqliteContentBackend;

// Re-export from taxonomist-core for convenience
pub use taxonomist_core::errors::{DatabaseError, Error, Result};
