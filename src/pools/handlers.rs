use std::collections::HashMap;
use std::sync::Arc;

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::service::context::ServiceContext;

use super::middleware::PoolContext;
use super::types::PoolSummary;

/// A content provider surfaced by a pool's `/api/providers` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub provider: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderList {
    #[serde(default)]
    providers: Vec<Provider>,
}

#[derive(Debug, Serialize)]
pub struct PoolListing {
    #[serde(flatten)]
    pub summary: PoolSummary,
    pub language: String,
    pub providers: Vec<Provider>,
}

/// List the materialized pool identities, each enriched with the providers it
/// advertises. Provider lookups run in parallel on the fast client; a pool
/// that cannot answer degrades to an empty provider list.
pub async fn handle_get_pools(
    Extension(ctx): Extension<Arc<ServiceContext>>,
    Extension(pool_ctx): Extension<PoolContext>,
) -> Json<Vec<PoolListing>> {
    let pools = &pool_ctx.pools;
    let (tx, mut rx) = mpsc::channel::<(String, Vec<Provider>)>(pools.len().max(1));

    for pool in pools.iter() {
        let client = ctx.clients.fast();
        let tx = tx.clone();
        let pool_id = pool.id.clone();
        let url = format!("{}/api/providers", pool.private_url);
        let language = pool_ctx.language.clone();
        tokio::spawn(async move {
            let resp = client.get(&url, &[("Accept-Language", &language)]).await;
            let providers = if resp.is_ok() {
                match serde_json::from_str::<ProviderList>(&resp.body) {
                    Ok(list) => list.providers,
                    Err(err) => {
                        tracing::warn!("Unable to parse providers from {}: {}", url, err);
                        Vec::new()
                    }
                }
            } else {
                Vec::new()
            };
            let _ = tx.send((pool_id, providers)).await;
        });
    }

    let mut by_pool: HashMap<String, Vec<Provider>> = HashMap::new();
    for _ in 0..pools.len() {
        match rx.recv().await {
            Some((pool_id, providers)) => {
                by_pool.insert(pool_id, providers);
            }
            None => break,
        }
    }

    let listing = pools
        .iter()
        .map(|pool| PoolListing {
            summary: PoolSummary::from(pool),
            language: pool.language.clone(),
            providers: by_pool.remove(&pool.id).unwrap_or_default(),
        })
        .collect();

    Json(listing)
}
