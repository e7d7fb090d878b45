//! Traits for the content backend and the taxonomy query service.

use crate::Result;

use super::{
    ContentTypeRecord, ContentTypeView, TaxonomyIndex, TaxonomyRecord, TaxonomyView, TermQuery,
    TermRecord, TermView,
};

/// Read access to the taxonomy registry of a content-management backend.
pub trait ContentBackend: Send + Sync {
    /// Every registered taxonomy, public or not, in registration order.
    fn get_taxonomies(&self) -> Result<Vec<TaxonomyRecord>>;

    /// Taxonomies attached to `content_type`, or `None` when the content type
    /// is not registered.
    fn get_taxonomies_for_content_type(
        &self,
        content_type: &str,
    ) -> Result<Option<Vec<TaxonomyRecord>>>;

    fn get_taxonomy(&self, slug: &str) -> Result<Option<TaxonomyRecord>>;

    /// All terms of `taxonomy` in backend order.
    fn get_terms(&self, taxonomy: &str) -> Result<Vec<TermRecord>>;

    fn get_term(&self, taxonomy: &str, term_id: i64) -> Result<Option<TermRecord>>;

    fn get_content_types(&self) -> Result<Vec<ContentTypeRecord>>;
}

/// Service trait for taxonomy queries.
pub trait TaxonomyServiceTrait: Send + Sync {
    fn list_taxonomies(&self, content_type: Option<&str>) -> Result<TaxonomyIndex>;
    fn get_taxonomy(&self, slug: &str) -> Result<TaxonomyView>;
    fn list_terms(&self, taxonomy: &str, query: &TermQuery) -> Result<Vec<TermView>>;
    fn get_term(&self, taxonomy: &str, term_id: i64) -> Result<TermView>;
    fn list_content_types(&self) -> Result<Vec<ContentTypeView>>;
}
