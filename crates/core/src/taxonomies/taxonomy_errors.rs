//! Taxonomy lookup errors.

use thiserror::Error;

/// Failures raised when a taxonomy, content type or term does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("Invalid taxonomy: {0}")]
    TaxonomyNotFound(String),

    #[error("Invalid content type: {0}")]
    ContentTypeNotFound(String),

    #[error("Invalid term {term_id} in taxonomy {taxonomy}")]
    TermNotFound { taxonomy: String, term_id: i64 },
}

impl TaxonomyError {
    pub fn taxonomy_not_found(slug: impl Into<String>) -> Self {
        Self::TaxonomyNotFound(slug.into())
    }

    pub fn content_type_not_found(slug: impl Into<String>) -> Self {
        Self::ContentTypeNotFound(slug.into())
    }

    pub fn term_not_found(taxonomy: impl Into<String>, term_id: i64) -> Self {
        Self::TermNotFound {
            taxonomy: taxonomy.into(),
            term_id,
        }
    }
}
