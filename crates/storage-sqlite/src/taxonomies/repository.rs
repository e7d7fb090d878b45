//! Content backend implementation backed by SQLite.

use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use taxonomist_core::errors::ValidationError;
use taxonomist_core::taxonomies::{
    ContentBackend, ContentSeed, ContentTypeRecord, TaxonomyRecord, TermRecord,
};
use taxonomist_core::Result;

use super::model::{ContentTypeDB, TaxonomyDB, TaxonomyObjectTypeDB, TermDB};
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{content_types, taxonomies, taxonomy_object_types, terms};

pub struct SqliteContentBackend {
    pool: Arc<DbPool>,
}

impl SqliteContentBackend {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Registers every content type, taxonomy and term of `seed`.
    ///
    /// Existing rows with the same key are updated in place and keep their
    /// position. Returns the number of records written.
    pub fn import_seed(&self, seed: &ContentSeed) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        let mut known: HashSet<String> = taxonomies::table
            .select(taxonomies::name)
            .load::<String>(&mut conn)
            .into_core()?
            .into_iter()
            .collect();
        known.extend(seed.taxonomies.iter().map(|t| t.name.clone()));
        if let Some(orphan) = seed.terms.iter().find(|t| !known.contains(&t.taxonomy)) {
            return Err(ValidationError::InvalidInput(format!(
                "Term {} references unknown taxonomy '{}'",
                orphan.term_id, orphan.taxonomy
            ))
            .into());
        }

        let written = conn
            .transaction::<usize, StorageError, _>(|conn| {
                let mut written = 0;
                for content_type in &seed.content_types {
                    written += upsert_content_type(conn, content_type)?;
                }
                for taxonomy in &seed.taxonomies {
                    written += upsert_taxonomy(conn, taxonomy)?;
                }
                for term in &seed.terms {
                    written += upsert_term(conn, term)?;
                }
                Ok(written)
            })
            .into_core()?;

        info!(
            "Imported {} content types, {} taxonomies, {} terms",
            seed.content_types.len(),
            seed.taxonomies.len(),
            seed.terms.len()
        );
        Ok(written)
    }
}

fn upsert_content_type(
    conn: &mut SqliteConnection,
    record: &ContentTypeRecord,
) -> QueryResult<usize> {
    let position: i64 = content_types::table.count().get_result(conn)?;
    let row = ContentTypeDB::from_record(record, position as i32);
    diesel::insert_into(content_types::table)
        .values(&row)
        .on_conflict(content_types::name)
        .do_update()
        .set(content_types::label.eq(&row.label))
        .execute(conn)
}

fn upsert_taxonomy(conn: &mut SqliteConnection, record: &TaxonomyRecord) -> QueryResult<usize> {
    let position: i64 = taxonomies::table.count().get_result(conn)?;
    let row = TaxonomyDB::from_record(record, position as i32);
    let written = diesel::insert_into(taxonomies::table)
        .values(&row)
        .on_conflict(taxonomies::name)
        .do_update()
        .set((
            taxonomies::label.eq(&row.label),
            taxonomies::hierarchical.eq(row.hierarchical),
            taxonomies::show_tagcloud.eq(row.show_tagcloud),
            taxonomies::public.eq(row.public),
        ))
        .execute(conn)?;

    // Attachments are replaced wholesale so their order follows the record.
    diesel::delete(
        taxonomy_object_types::table.filter(taxonomy_object_types::taxonomy.eq(&record.name)),
    )
    .execute(conn)?;
    let attachments: Vec<TaxonomyObjectTypeDB> = record
        .object_types
        .iter()
        .enumerate()
        .map(|(i, content_type)| TaxonomyObjectTypeDB {
            taxonomy: record.name.clone(),
            content_type: content_type.clone(),
            sort_order: i as i32,
        })
        .collect();
    if !attachments.is_empty() {
        diesel::insert_into(taxonomy_object_types::table)
            .values(&attachments)
            .execute(conn)?;
    }

    Ok(written)
}

fn upsert_term(conn: &mut SqliteConnection, record: &TermRecord) -> QueryResult<usize> {
    let row = TermDB::from(record);
    diesel::insert_into(terms::table)
        .values(&row)
        .on_conflict(terms::term_id)
        .do_update()
        .set((
            terms::taxonomy.eq(&row.taxonomy),
            terms::name.eq(&row.name),
            terms::slug.eq(&row.slug),
            terms::description.eq(&row.description),
            terms::parent.eq(row.parent),
            terms::term_count.eq(row.term_count),
        ))
        .execute(conn)
}

/// Loads the attached object types for `names`, grouped per taxonomy.
fn object_types_for(
    conn: &mut SqliteConnection,
    names: &[String],
) -> QueryResult<HashMap<String, Vec<String>>> {
    let rows = taxonomy_object_types::table
        .filter(taxonomy_object_types::taxonomy.eq_any(names))
        .order((
            taxonomy_object_types::taxonomy.asc(),
            taxonomy_object_types::sort_order.asc(),
        ))
        .select(TaxonomyObjectTypeDB::as_select())
        .load::<TaxonomyObjectTypeDB>(conn)?;

    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        grouped.entry(row.taxonomy).or_default().push(row.content_type);
    }
    Ok(grouped)
}

fn with_object_types(
    conn: &mut SqliteConnection,
    rows: Vec<TaxonomyDB>,
) -> QueryResult<Vec<TaxonomyRecord>> {
    let names: Vec<String> = rows.iter().map(|row| row.name.clone()).collect();
    let mut object_types = object_types_for(conn, &names)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let types = object_types.remove(&row.name).unwrap_or_default();
            row.into_record(types)
        })
        .collect())
}

impl ContentBackend for SqliteContentBackend {
    fn get_taxonomies(&self) -> Result<Vec<TaxonomyRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = taxonomies::table
            .order((taxonomies::sort_order.asc(), taxonomies::name.asc()))
            .select(TaxonomyDB::as_select())
            .load::<TaxonomyDB>(&mut conn)
            .into_core()?;
        with_object_types(&mut conn, rows).into_core()
    }

    fn get_taxonomies_for_content_type(
        &self,
        content_type: &str,
    ) -> Result<Option<Vec<TaxonomyRecord>>> {
        let mut conn = get_connection(&self.pool)?;
        let registered = content_types::table
            .find(content_type)
            .select(ContentTypeDB::as_select())
            .first::<ContentTypeDB>(&mut conn)
            .optional()
            .into_core()?;
        if registered.is_none() {
            debug!("Content type {} is not registered", content_type);
            return Ok(None);
        }

        let rows = taxonomies::table
            .inner_join(taxonomy_object_types::table)
            .filter(taxonomy_object_types::content_type.eq(content_type))
            .order((taxonomies::sort_order.asc(), taxonomies::name.asc()))
            .select(TaxonomyDB::as_select())
            .load::<TaxonomyDB>(&mut conn)
            .into_core()?;
        with_object_types(&mut conn, rows).into_core().map(Some)
    }

    fn get_taxonomy(&self, slug: &str) -> Result<Option<TaxonomyRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let row = taxonomies::table
            .find(slug)
            .select(TaxonomyDB::as_select())
            .first::<TaxonomyDB>(&mut conn)
            .optional()
            .into_core()?;
        match row {
            Some(row) => Ok(with_object_types(&mut conn, vec![row])
                .into_core()?
                .pop()),
            None => Ok(None),
        }
    }

    fn get_terms(&self, taxonomy: &str) -> Result<Vec<TermRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = terms::table
            .filter(terms::taxonomy.eq(taxonomy))
            .order((terms::name.asc(), terms::term_id.asc()))
            .select(TermDB::as_select())
            .load::<TermDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(TermRecord::from).collect())
    }

    fn get_term(&self, taxonomy: &str, term_id: i64) -> Result<Option<TermRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let row = terms::table
            .filter(terms::taxonomy.eq(taxonomy))
            .filter(terms::term_id.eq(term_id))
            .select(TermDB::as_select())
            .first::<TermDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(TermRecord::from))
    }

    fn get_content_types(&self) -> Result<Vec<ContentTypeRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = content_types::table
            .order((content_types::sort_order.asc(), content_types::name.asc()))
            .select(ContentTypeDB::as_select())
            .load::<ContentTypeDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(ContentTypeRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use tempfile::TempDir;

    fn backend() -> (TempDir, SqliteContentBackend) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomist.db");
        let db_path = db::init(path.to_str().unwrap()).unwrap();
        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();
        (dir, SqliteContentBackend::new(pool))
    }

    fn term(term_id: i64, taxonomy: &str, name: &str, count: i64) -> TermRecord {
        TermRecord {
            term_id,
            taxonomy: taxonomy.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: format!("All about {}", name),
            parent: 0,
            count,
        }
    }

    #[test]
    fn migrations_register_default_taxonomies() {
        let (_dir, backend) = backend();

        let names: Vec<String> = backend
            .get_taxonomies()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec!["category", "post_tag", "nav_menu", "link_category", "post_format"]
        );

        let category = backend.get_taxonomy("category").unwrap().unwrap();
        assert_eq!(category.label, "Categories");
        assert!(category.hierarchical);
        assert!(category.public);
        assert_eq!(category.object_types, vec!["post".to_string()]);

        let nav_menu = backend.get_taxonomy("nav_menu").unwrap().unwrap();
        assert!(!nav_menu.public);
        assert!(!nav_menu.show_tagcloud);
    }

    #[test]
    fn uncategorized_term_is_registered() {
        let (_dir, backend) = backend();
        let term = backend.get_term("category", 1).unwrap().unwrap();
        assert_eq!(term.name, "Uncategorized");
        assert_eq!(term.slug, "uncategorized");
        assert_eq!(term.description, "");
        assert_eq!(term.count, 0);

        assert!(backend.get_term("post_tag", 1).unwrap().is_none());
        assert!(backend.get_term("category", 999).unwrap().is_none());
    }

    #[test]
    fn taxonomies_for_content_type() {
        let (_dir, backend) = backend();

        let post: Vec<String> = backend
            .get_taxonomies_for_content_type("post")
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(post, vec!["category", "post_tag", "post_format"]);

        let page = backend.get_taxonomies_for_content_type("page").unwrap();
        assert_eq!(page, Some(Vec::new()));

        assert!(backend
            .get_taxonomies_for_content_type("product")
            .unwrap()
            .is_none());
    }

    #[test]
    fn content_types_keep_registration_order() {
        let (_dir, backend) = backend();
        let names: Vec<String> = backend
            .get_content_types()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            names,
            vec!["post", "page", "attachment", "revision", "nav_menu_item"]
        );
    }

    #[test]
    fn import_seed_registers_custom_taxonomy() {
        let (_dir, backend) = backend();
        let seed = ContentSeed {
            content_types: vec![ContentTypeRecord {
                name: "book".to_string(),
                label: "Books".to_string(),
            }],
            taxonomies: vec![TaxonomyRecord {
                name: "genre".to_string(),
                label: "Genres".to_string(),
                hierarchical: true,
                show_tagcloud: false,
                public: true,
                object_types: vec!["book".to_string(), "post".to_string()],
            }],
            terms: vec![
                term(10, "genre", "Poetry", 3),
                term(11, "genre", "Drama", 0),
                term(12, "category", "News", 2),
            ],
        };

        let written = backend.import_seed(&seed).unwrap();
        assert_eq!(written, 5);

        let genre = backend.get_taxonomy("genre").unwrap().unwrap();
        assert_eq!(genre.object_types, vec!["book".to_string(), "post".to_string()]);

        let book: Vec<String> = backend
            .get_taxonomies_for_content_type("book")
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(book, vec!["genre"]);

        // Backend order is by name.
        let names: Vec<String> = backend
            .get_terms("genre")
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Drama", "Poetry"]);

        let categories = backend.get_terms("category").unwrap();
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn import_seed_updates_existing_rows_in_place() {
        let (_dir, backend) = backend();
        let mut uncategorized = backend.get_term("category", 1).unwrap().unwrap();
        uncategorized.count = 5;
        let mut category = backend.get_taxonomy("category").unwrap().unwrap();
        category.label = "Sections".to_string();

        backend
            .import_seed(&ContentSeed {
                taxonomies: vec![category],
                terms: vec![uncategorized],
                ..ContentSeed::default()
            })
            .unwrap();

        assert_eq!(backend.get_term("category", 1).unwrap().unwrap().count, 5);
        let taxonomies = backend.get_taxonomies().unwrap();
        assert_eq!(taxonomies[0].name, "category");
        assert_eq!(taxonomies[0].label, "Sections");
    }

    #[test]
    fn import_seed_rejects_orphan_terms() {
        let (_dir, backend) = backend();
        let err = backend
            .import_seed(&ContentSeed {
                terms: vec![term(20, "genre", "Poetry", 1)],
                ..ContentSeed::default()
            })
            .unwrap_err();
        assert!(matches!(err, taxonomist_core::Error::Validation(_)));
        assert!(backend.get_terms("genre").unwrap().is_empty());
    }
}
