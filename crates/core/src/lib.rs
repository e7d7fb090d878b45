//! Taxonomist Core - Domain records, services, and traits.
//!
//! This crate contains the taxonomy query logic. It is storage-agnostic and
//! defines the `ContentBackend` trait implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod taxonomies;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
