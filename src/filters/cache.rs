use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use arc_swap::ArcSwap;
use tokio::sync::mpsc;

use crate::auth::claims::mint_service_token;
use crate::client::tiered::OutboundClient;
use crate::pools::identify::{identify_pools, FALLBACK_LANGUAGE};
use crate::pools::registry;
use crate::pools::types::Pool;
use crate::service::context::ServiceContext;

use super::merge::{apply_eds_allow_list, merge_source_filters, normalize_filter_ids};
use super::types::{PoolFilter, PoolFilterList, QueryFilter};

/// Source kinds in preference order. Order matters: solr pools carry more
/// translations for shared filter ids and are the only ones that specify a
/// bucket sort order.
const SOURCE_KINDS: &[&str] = &["solr", "solr-images", "eds"];

const SERVICE_TOKEN_TTL: Duration = Duration::from_secs(300);

/// Process-lifetime cache of the merged advanced-search filter catalog. The
/// snapshot swaps atomically; readers never block the refresher and never
/// observe a partial merge.
pub struct FilterCache {
    refresh_interval: Duration,
    snapshot: ArcSwap<Vec<QueryFilter>>,
}

impl FilterCache {
    pub fn new(refresh_seconds: u64) -> Self {
        Self {
            refresh_interval: Duration::from_secs(refresh_seconds),
            snapshot: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Latest fully merged snapshot.
    pub fn current(&self) -> Arc<Vec<QueryFilter>> {
        self.snapshot.load_full()
    }

    pub fn publish(&self, filters: Vec<QueryFilter>) {
        self.snapshot.store(Arc::new(filters));
    }

    /// Start the background refresh loop. The first tick fires immediately;
    /// a failed refresh keeps the previous snapshot and waits for the next.
    pub fn spawn(ctx: Arc<ServiceContext>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ctx.filter_cache.refresh_interval);
            loop {
                interval.tick().await;
                if let Err(err) = refresh(&ctx).await {
                    tracing::warn!("Filter refresh skipped: {}", err);
                }
                tracing::info!(
                    "Filter refresh scheduled in {}s",
                    ctx.filter_cache.refresh_interval.as_secs()
                );
            }
        });
    }
}

async fn refresh(ctx: &ServiceContext) -> Result<()> {
    tracing::info!("Refreshing advanced search filters");

    let rows = registry::list_enabled(&ctx.db).await?;
    let pools = identify_pools(&ctx.clients, rows, FALLBACK_LANGUAGE).await?;

    // one representative pool per source kind, in preference order
    let mut representatives: Vec<Pool> = Vec::new();
    for kind in SOURCE_KINDS {
        match pools.iter().find(|pool| pool.source == *kind) {
            Some(pool) => {
                tracing::info!("Source {} will query pool {}", kind, pool.id);
                representatives.push(pool.clone());
            }
            None => tracing::info!("Source {} has no representative pool", kind),
        }
    }
    if representatives.is_empty() {
        anyhow::bail!("no representative pools for any filter source");
    }

    let token = mint_service_token(&ctx.jwt_key, SERVICE_TOKEN_TTL)?;

    let outstanding = representatives.len();
    let (tx, mut rx) = mpsc::channel::<(String, Option<Vec<PoolFilter>>)>(outstanding);
    for pool in representatives.iter().cloned() {
        let client = ctx.clients.slow();
        let token = token.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let filters = fetch_pool_filters(&client, &pool, &token).await;
            let _ = tx.send((pool.source.clone(), filters)).await;
        });
    }

    let mut by_source: HashMap<String, Vec<PoolFilter>> = HashMap::new();
    for _ in 0..outstanding {
        match rx.recv().await {
            Some((source, Some(filters))) => {
                by_source.insert(source, filters);
            }
            Some((_, None)) => {}
            None => break,
        }
    }

    // every selected source must have answered with a non-empty list
    if by_source.len() != outstanding {
        anyhow::bail!("not all filter sources responded; keeping previous snapshot");
    }

    let ordered: Vec<(String, Vec<PoolFilter>)> = representatives
        .iter()
        .filter_map(|pool| {
            by_source
                .remove(&pool.source)
                .map(|filters| (pool.source.clone(), filters))
        })
        .collect();

    let combined = merge_source_filters(&ordered);
    tracing::info!("Publishing {} merged filters", combined.len());
    ctx.filter_cache.publish(combined);
    Ok(())
}

/// Fetch one pool's filter catalog with a service token. Returns None on any
/// failure, including an empty list, which the refresher treats as a failed
/// source.
async fn fetch_pool_filters(
    client: &OutboundClient,
    pool: &Pool,
    token: &str,
) -> Option<Vec<PoolFilter>> {
    let authorization = format!("Bearer {}", token);

    let resp = if pool.source == "eds" {
        let url = format!("{}/api/search/facets", pool.private_url);
        let body = serde_json::json!({"query": "keyword:{*}"});
        client
            .post_json(&url, &body, &[("Authorization", &authorization)])
            .await
    } else {
        let url = format!("{}/api/filters", pool.private_url);
        client
            .get(
                &url,
                &[
                    ("Authorization", &authorization),
                    ("Accept-Language", FALLBACK_LANGUAGE),
                ],
            )
            .await
    };

    if !resp.is_ok() {
        tracing::warn!(
            "{} filter fetch failed {}:{}",
            pool.source,
            resp.status_code,
            resp.body
        );
        return None;
    }

    let parsed: PoolFilterList = match serde_json::from_str(&resp.body) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!("{} filter response malformed: {}", pool.source, err);
            return None;
        }
    };

    let mut filters = parsed.facet_list;
    if pool.source == "eds" {
        apply_eds_allow_list(&mut filters);
    }
    normalize_filter_ids(&mut filters);

    if filters.is_empty() {
        tracing::warn!("{} returned no filters", pool.source);
        return None;
    }

    Some(filters)
}
