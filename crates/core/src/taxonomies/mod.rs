//! Taxonomies module - domain models, services, and traits.
//!
//! Exposes registered taxonomies, their terms and the content types they are
//! attached to as read-only JSON views.

mod taxonomy_errors;
mod taxonomy_model;
mod taxonomy_service;
mod taxonomy_traits;

pub use taxonomy_errors::TaxonomyError;
pub use taxonomy_model::{
    ContentSeed, ContentTypeRecord, ContentTypeView, TaxonomyIndex, TaxonomyRecord, TaxonomyView,
    TermQuery, TermRecord, TermView,
};
pub use taxonomy_service::TaxonomyService;
pub use taxonomy_traits::{ContentBackend, TaxonomyServiceTrait};
