use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use taxonomist_core::taxonomies::{
    ContentTypeView, TaxonomyIndex, TaxonomyView, TermQuery, TermView,
};
use tracing::debug;

/// Query string accepted by the taxonomy listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyListQuery {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

/// Query string accepted by the term listing.
///
/// Over HTTP, empty terms are listed unless `include_empty=false` is given.
#[derive(Debug, Clone, Deserialize)]
pub struct TermListQuery {
    #[serde(default = "default_include_empty")]
    pub include_empty: bool,
    pub parent: Option<i64>,
}

fn default_include_empty() -> bool {
    true
}

impl From<TermListQuery> for TermQuery {
    fn from(query: TermListQuery) -> Self {
        TermQuery {
            include_empty: query.include_empty,
            parent: query.parent,
        }
    }
}

// ============================================================================
// Taxonomy Endpoints
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/taxonomies",
    params(("type" = Option<String>, Query, description = "Only taxonomies attached to this content type")),
    responses(
        (status = 200, description = "Public taxonomies keyed by slug"),
        (status = 404, description = "Unknown content type")
    )
)]
pub async fn list_taxonomies(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TaxonomyListQuery>, QueryRejection>,
) -> ApiResult<Json<TaxonomyIndex>> {
    let Query(query) = query?;
    debug!("Fetching taxonomies (type: {:?})...", query.content_type);
    let taxonomies = state
        .taxonomy_service
        .list_taxonomies(query.content_type.as_deref())?;
    Ok(Json(taxonomies))
}

#[utoipa::path(
    get,
    path = "/api/v1/taxonomies/{taxonomy}",
    params(("taxonomy" = String, Path, description = "Taxonomy slug")),
    responses(
        (status = 200, description = "Taxonomy"),
        (status = 404, description = "Unknown taxonomy")
    )
)]
pub async fn get_taxonomy(
    path: Result<Path<String>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TaxonomyView>> {
    let Path(taxonomy) = path?;
    debug!("Fetching taxonomy {}...", taxonomy);
    let view = state.taxonomy_service.get_taxonomy(&taxonomy)?;
    Ok(Json(view))
}

// ============================================================================
// Term Endpoints
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/taxonomies/{taxonomy}/terms",
    params(
        ("taxonomy" = String, Path, description = "Taxonomy slug"),
        ("include_empty" = Option<bool>, Query, description = "Keep terms without content (default true)"),
        ("parent" = Option<i64>, Query, description = "Only children of this term (0 for roots)")
    ),
    responses(
        (status = 200, description = "Terms in backend order"),
        (status = 404, description = "Unknown taxonomy")
    )
)]
pub async fn list_terms(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<TermListQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TermView>>> {
    let Path(taxonomy) = path?;
    let Query(query) = query?;
    let query = TermQuery::from(query);
    debug!("Fetching terms of {} ({:?})...", taxonomy, query);
    let terms = state.taxonomy_service.list_terms(&taxonomy, &query)?;
    Ok(Json(terms))
}

#[utoipa::path(
    get,
    path = "/api/v1/taxonomies/{taxonomy}/terms/{id}",
    params(
        ("taxonomy" = String, Path, description = "Taxonomy slug"),
        ("id" = i64, Path, description = "Term id")
    ),
    responses(
        (status = 200, description = "Term"),
        (status = 400, description = "Malformed term id"),
        (status = 404, description = "Unknown taxonomy or term")
    )
)]
pub async fn get_term(
    path: Result<Path<(String, i64)>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TermView>> {
    let Path((taxonomy, id)) = path?;
    debug!("Fetching term {} of {}...", id, taxonomy);
    let term = state.taxonomy_service.get_term(&taxonomy, id)?;
    Ok(Json(term))
}

// ============================================================================
// Content Type Endpoints
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/types",
    responses((status = 200, description = "Registered content types"))
)]
pub async fn list_content_types(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ContentTypeView>>> {
    debug!("Fetching content types...");
    let types = state.taxonomy_service.list_content_types()?;
    Ok(Json(types))
}

#[utoipa::path(
    get,
    path = "/api/v1/types/{content_type}/taxonomies",
    params(("content_type" = String, Path, description = "Content type slug")),
    responses(
        (status = 200, description = "Public taxonomies of the content type keyed by slug"),
        (status = 404, description = "Unknown content type")
    )
)]
pub async fn list_content_type_taxonomies(
    path: Result<Path<String>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TaxonomyIndex>> {
    let Path(content_type) = path?;
    debug!("Fetching taxonomies of content type {}...", content_type);
    let taxonomies = state
        .taxonomy_service
        .list_taxonomies(Some(&content_type))?;
    Ok(Json(taxonomies))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/taxonomies", get(list_taxonomies))
        .route("/taxonomies/{taxonomy}", get(get_taxonomy))
        .route("/taxonomies/{taxonomy}/terms", get(list_terms))
        .route("/taxonomies/{taxonomy}/terms/{id}", get(get_term))
        .route("/types", get(list_content_types))
        .route(
            "/types/{content_type}/taxonomies",
            get(list_content_type_taxonomies),
        )
}
