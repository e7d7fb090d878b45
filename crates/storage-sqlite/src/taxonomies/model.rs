//! Database models for the taxonomy registry.

use diesel::prelude::*;

use taxonomist_core::taxonomies::{ContentTypeRecord, TaxonomyRecord, TermRecord};

/// Database model for registered content types
#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::content_types)]
#[diesel(primary_key(name))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContentTypeDB {
    pub name: String,
    pub label: String,
    pub sort_order: i32,
}

/// Database model for taxonomies
#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::taxonomies)]
#[diesel(primary_key(name))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaxonomyDB {
    pub name: String,
    pub label: String,
    pub hierarchical: i32,  // Schema uses Integer
    pub show_tagcloud: i32, // Schema uses Integer
    pub public: i32,        // Schema uses Integer
    pub sort_order: i32,
}

/// Database model for taxonomy to object type attachments
#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::taxonomy_object_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaxonomyObjectTypeDB {
    pub taxonomy: String,
    pub content_type: String,
    pub sort_order: i32,
}

/// Database model for terms
#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::terms)]
#[diesel(primary_key(term_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TermDB {
    pub term_id: i64,
    pub taxonomy: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub parent: i64,
    pub term_count: i64,
}

impl TaxonomyDB {
    pub fn from_record(record: &TaxonomyRecord, sort_order: i32) -> Self {
        Self {
            name: record.name.clone(),
            label: record.label.clone(),
            hierarchical: i32::from(record.hierarchical),
            show_tagcloud: i32::from(record.show_tagcloud),
            public: i32::from(record.public),
            sort_order,
        }
    }

    pub fn into_record(self, object_types: Vec<String>) -> TaxonomyRecord {
        TaxonomyRecord {
            name: self.name,
            label: self.label,
            hierarchical: self.hierarchical != 0,
            show_tagcloud: self.show_tagcloud != 0,
            public: self.public != 0,
            object_types,
        }
    }
}

impl ContentTypeDB {
    pub fn from_record(record: &ContentTypeRecord, sort_order: i32) -> Self {
        Self {
            name: record.name.clone(),
            label: record.label.clone(),
            sort_order,
        }
    }
}

// Conversion to domain models
impl From<ContentTypeDB> for ContentTypeRecord {
    fn from(db: ContentTypeDB) -> Self {
        Self {
            name: db.name,
            label: db.label,
        }
    }
}

impl From<TermDB> for TermRecord {
    fn from(db: TermDB) -> Self {
        Self {
            term_id: db.term_id,
            taxonomy: db.taxonomy,
            name: db.name,
            slug: db.slug,
            description: db.description,
            parent: db.parent,
            count: db.term_count,
        }
    }
}

// Conversion from domain models
impl From<&TermRecord> for TermDB {
    fn from(record: &TermRecord) -> Self {
        Self {
            term_id: record.term_id,
            taxonomy: record.taxonomy.clone(),
            name: record.name.clone(),
            slug: record.slug.clone(),
            description: record.description.clone(),
            parent: record.parent,
            term_count: record.count,
        }
    }
}
