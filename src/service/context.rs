use std::sync::Arc;

use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::client::tiered::ClientPool;
use crate::filters::cache::FilterCache;

use super::config::ServiceConfig;

/// Shared state handed to every handler and background task.
pub struct ServiceContext {
    pub version: String,
    pub db: PgPool,
    pub clients: ClientPool,
    pub suggestor_url: String,
    pub jwt_key: String,
    pub filter_cache: FilterCache,
}

impl ServiceContext {
    pub async fn initialize(version: &str, cfg: &ServiceConfig) -> Result<Arc<Self>> {
        tracing::info!("Connect to Postgres at {}:{}", cfg.db_host, cfg.db_port);
        let db = PgPoolOptions::new()
            .max_connections(5)
            .connect(&cfg.database_url())
            .await?;

        tracing::info!("Create HTTP clients for pool and suggestor calls");
        let clients = ClientPool::new()?;

        Ok(Arc::new(Self {
            version: version.to_string(),
            db,
            clients,
            suggestor_url: cfg.suggestor_url.clone(),
            jwt_key: cfg.jwt_key.clone(),
            filter_cache: FilterCache::new(cfg.filter_refresh_seconds),
        }))
    }
}
