//! Domain models for taxonomies and terms.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

fn default_true() -> bool {
    true
}

/// A registered classification scheme (e.g. "category", "post_tag").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    /// Slug the taxonomy is registered under.
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub hierarchical: bool,
    #[serde(default = "default_true")]
    pub show_tagcloud: bool,
    #[serde(default = "default_true")]
    pub public: bool,
    /// Content types the taxonomy is attached to, in registration order.
    #[serde(default)]
    pub object_types: Vec<String>,
}

/// A single value within a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub term_id: i64,
    pub taxonomy: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Parent term id; `0` for root terms.
    #[serde(default)]
    pub parent: i64,
    #[serde(default)]
    pub count: i64,
}

/// A named category of content objects (e.g. "post", "page").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeRecord {
    pub name: String,
    pub label: String,
}

/// JSON shape of a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyView {
    pub name: String,
    pub slug: String,
    pub hierarchical: bool,
    pub show_cloud: bool,
    pub types: Vec<String>,
}

impl From<TaxonomyRecord> for TaxonomyView {
    fn from(record: TaxonomyRecord) -> Self {
        Self {
            name: record.label,
            slug: record.name,
            hierarchical: record.hierarchical,
            show_cloud: record.show_tagcloud,
            types: record.object_types,
        }
    }
}

/// JSON shape of a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermView {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: i64,
    pub parent: Option<i64>,
}

impl From<TermRecord> for TermView {
    fn from(record: TermRecord) -> Self {
        Self {
            id: record.term_id,
            name: record.name,
            slug: record.slug,
            description: record.description,
            count: record.count,
            parent: (record.parent != 0).then_some(record.parent),
        }
    }
}

/// JSON shape of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeView {
    pub name: String,
    pub slug: String,
}

impl From<ContentTypeRecord> for ContentTypeView {
    fn from(record: ContentTypeRecord) -> Self {
        Self {
            name: record.label,
            slug: record.name,
        }
    }
}

/// Taxonomy views keyed by slug.
///
/// Keeps backend order and serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyIndex {
    entries: Vec<TaxonomyView>,
}

impl TaxonomyIndex {
    pub fn get(&self, slug: &str) -> Option<&TaxonomyView> {
        self.entries.iter().find(|view| view.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.entries.iter().map(|view| view.slug.as_str()).collect()
    }
}

impl FromIterator<TaxonomyView> for TaxonomyIndex {
    fn from_iter<I: IntoIterator<Item = TaxonomyView>>(iter: I) -> Self {
        let mut index = TaxonomyIndex::default();
        for view in iter {
            // Slugs are unique in a well-formed backend; keep the first one seen.
            if !index.contains(&view.slug) {
                index.entries.push(view);
            }
        }
        index
    }
}

impl Serialize for TaxonomyIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for view in &self.entries {
            map.serialize_entry(&view.slug, view)?;
        }
        map.end()
    }
}

/// Filters applied when listing the terms of a taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermQuery {
    /// Keep terms with no associated content.
    pub include_empty: bool,
    /// Only terms directly below this parent (`0` selects root terms).
    pub parent: Option<i64>,
}

impl TermQuery {
    pub fn include_empty() -> Self {
        Self {
            include_empty: true,
            parent: None,
        }
    }

    pub fn matches(&self, term: &TermRecord) -> bool {
        if !self.include_empty && term.count == 0 {
            return false;
        }
        match self.parent {
            Some(parent) => term.parent == parent,
            None => true,
        }
    }
}

/// Bulk registration document used to populate a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSeed {
    pub content_types: Vec<ContentTypeRecord>,
    pub taxonomies: Vec<TaxonomyRecord>,
    pub terms: Vec<TermRecord>,
}

impl ContentSeed {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty() && self.taxonomies.is_empty() && self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uncategorized() -> TermRecord {
        TermRecord {
            term_id: 1,
            taxonomy: "category".to_string(),
            name: "Uncategorized".to_string(),
            slug: "uncategorized".to_string(),
            description: String::new(),
            parent: 0,
            count: 5,
        }
    }

    #[test]
    fn term_view_uses_cms_field_names() {
        let json = serde_json::to_value(TermView::from(uncategorized())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ID": 1,
                "name": "Uncategorized",
                "slug": "uncategorized",
                "description": "",
                "count": 5,
                "parent": null,
            })
        );
    }

    #[test]
    fn child_term_reports_parent() {
        let child = TermRecord {
            term_id: 7,
            parent: 1,
            ..uncategorized()
        };
        assert_eq!(TermView::from(child).parent, Some(1));
    }

    #[test]
    fn taxonomy_view_renames_label_and_tagcloud() {
        let record = TaxonomyRecord {
            name: "genre".to_string(),
            label: "Genres".to_string(),
            hierarchical: true,
            show_tagcloud: false,
            public: true,
            object_types: vec!["book".to_string()],
        };
        let view = TaxonomyView::from(record);
        assert_eq!(view.name, "Genres");
        assert_eq!(view.slug, "genre");
        assert!(view.hierarchical);
        assert!(!view.show_cloud);
        assert_eq!(view.types, vec!["book".to_string()]);
    }

    #[test]
    fn index_serializes_as_object_in_backend_order() {
        let index: TaxonomyIndex = ["post_tag", "category"]
            .iter()
            .map(|slug| TaxonomyView {
                name: slug.to_uppercase(),
                slug: slug.to_string(),
                hierarchical: false,
                show_cloud: true,
                types: Vec::new(),
            })
            .collect();

        let json = serde_json::to_string(&index).unwrap();
        assert!(json.starts_with("{\"post_tag\":"));
        assert!(json.contains("\"category\":{\"name\":\"CATEGORY\""));
        assert_eq!(index.slugs(), vec!["post_tag", "category"]);
    }

    #[test]
    fn term_query_defaults_hide_empty_terms() {
        let mut empty = uncategorized();
        empty.count = 0;

        assert!(!TermQuery::default().matches(&empty));
        assert!(TermQuery::include_empty().matches(&empty));
        assert!(TermQuery::default().matches(&uncategorized()));
    }

    #[test]
    fn term_query_parent_zero_selects_roots() {
        let query = TermQuery {
            include_empty: true,
            parent: Some(0),
        };
        let child = TermRecord {
            parent: 1,
            ..uncategorized()
        };
        assert!(query.matches(&uncategorized()));
        assert!(!query.matches(&child));
    }

    #[test]
    fn seed_flags_default_to_public_with_tagcloud() {
        let seed = ContentSeed::from_json(
            r#"{"taxonomies":[{"name":"genre","label":"Genres","object_types":["book"]}]}"#,
        )
        .unwrap();
        let genre = &seed.taxonomies[0];
        assert!(genre.public);
        assert!(genre.show_tagcloud);
        assert!(!genre.hierarchical);
        assert!(seed.content_types.is_empty());
    }

    #[test]
    fn malformed_seed_is_a_validation_error() {
        let err = ContentSeed::from_json("{\"terms\": 3}").unwrap_err();
        assert!(matches!(err, crate::Error::Validation(_)));
    }
}
