//! Taxonomy service implementation.

use log::debug;
use std::sync::Arc;

use crate::Result;

use super::{
    ContentBackend, ContentTypeView, TaxonomyError, TaxonomyIndex, TaxonomyRecord,
    TaxonomyServiceTrait, TaxonomyView, TermQuery, TermView,
};

pub struct TaxonomyService {
    backend: Arc<dyn ContentBackend>,
}

impl TaxonomyService {
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    fn require_taxonomy(&self, slug: &str) -> Result<TaxonomyRecord> {
        self.backend
            .get_taxonomy(slug)?
            .ok_or_else(|| TaxonomyError::taxonomy_not_found(slug).into())
    }
}

impl TaxonomyServiceTrait for TaxonomyService {
    fn list_taxonomies(&self, content_type: Option<&str>) -> Result<TaxonomyIndex> {
        let records = match content_type {
            Some(content_type) => self
                .backend
                .get_taxonomies_for_content_type(content_type)?
                .ok_or_else(|| TaxonomyError::content_type_not_found(content_type))?,
            None => self.backend.get_taxonomies()?,
        };

        let total = records.len();
        let index: TaxonomyIndex = records
            .into_iter()
            .filter(|taxonomy| taxonomy.public)
            .map(TaxonomyView::from)
            .collect();
        debug!(
            "Listing {} of {} taxonomies (content type: {:?})",
            index.len(),
            total,
            content_type
        );
        Ok(index)
    }

    fn get_taxonomy(&self, slug: &str) -> Result<TaxonomyView> {
        self.require_taxonomy(slug).map(TaxonomyView::from)
    }

    fn list_terms(&self, taxonomy: &str, query: &TermQuery) -> Result<Vec<TermView>> {
        let taxonomy = self.require_taxonomy(taxonomy)?;
        let terms = self.backend.get_terms(&taxonomy.name)?;
        Ok(terms
            .into_iter()
            .filter(|term| query.matches(term))
            .map(TermView::from)
            .collect())
    }

    fn get_term(&self, taxonomy: &str, term_id: i64) -> Result<TermView> {
        let taxonomy = self.require_taxonomy(taxonomy)?;
        self.backend
            .get_term(&taxonomy.name, term_id)?
            .map(TermView::from)
            .ok_or_else(|| TaxonomyError::term_not_found(taxonomy.name, term_id).into())
    }

    fn list_content_types(&self) -> Result<Vec<ContentTypeView>> {
        Ok(self
            .backend
            .get_content_types()?
            .into_iter()
            .map(ContentTypeView::from)
            .collect())
    }
}
