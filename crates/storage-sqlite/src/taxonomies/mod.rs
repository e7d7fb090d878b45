//! SQLite storage implementation for the taxonomy registry.

mod model;
mod repository;

pub use model::{ContentTypeDB, TaxonomyDB, TaxonomyObjectTypeDB, TermDB};
pub use repository::SqliteContentBackend;
