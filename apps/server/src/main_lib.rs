use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use taxonomist_core::taxonomies::{
    ContentBackend, ContentSeed, TaxonomyService, TaxonomyServiceTrait,
};
use taxonomist_storage_sqlite::{db, SqliteContentBackend};

use crate::config::Config;

pub struct AppState {
    pub taxonomy_service: Arc<dyn TaxonomyServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TX_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let backend = Arc::new(SqliteContentBackend::new(pool));
    if let Some(seed_file) = &config.seed_file {
        let json = tokio::fs::read_to_string(seed_file)
            .await
            .with_context(|| format!("Failed to read seed file {}", seed_file.display()))?;
        let seed = ContentSeed::from_json(&json)?;
        let written = backend.import_seed(&seed)?;
        tracing::info!(
            "Seeded {} records from {}",
            written,
            seed_file.display()
        );
    }

    let backend: Arc<dyn ContentBackend> = backend;
    let taxonomy_service = Arc::new(TaxonomyService::new(backend));

    Ok(Arc::new(AppState { taxonomy_service }))
}
