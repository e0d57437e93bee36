use std::collections::HashSet;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::client::tiered::{ClientPool, OutboundClient};

use super::types::{IdentifyResponse, Pool, RegistryRow};

/// Language every identity can fall back to; pools are required to answer it.
pub const FALLBACK_LANGUAGE: &str = "en-US";

/// Zero pools survived identification. Every downstream operation needs at
/// least one, so callers abort the request.
#[derive(Debug, Error)]
#[error("no search pools could be identified")]
pub struct NoPools;

/// Probe every registry entry's `/identify` endpoint in parallel and build
/// the request's pool set. Entries that fail identification in the requested
/// language and the fallback are dropped; registry sequence order is restored
/// after the concurrent collection.
pub async fn identify_pools(
    clients: &ClientPool,
    rows: Vec<RegistryRow>,
    language: &str,
) -> Result<Vec<Pool>, NoPools> {
    let outstanding = rows.len();
    let (tx, mut rx) = mpsc::channel::<Option<Pool>>(outstanding.max(1));

    for row in rows {
        let client = clients.fast();
        let language = language.to_string();
        let tx = tx.clone();
        tokio::spawn(async move {
            let pool = identify_one(&client, &row, &language).await;
            // the coordinator counts on exactly one completion per entry
            let _ = tx.send(pool).await;
        });
    }

    let mut pools: Vec<Pool> = Vec::new();
    for _ in 0..outstanding {
        match rx.recv().await {
            Some(Some(pool)) => pools.push(pool),
            Some(None) => {}
            None => break,
        }
    }

    // arrival order is nondeterministic; the set is ordered by sequence
    pools.sort_by_key(|pool| pool.sequence);
    drop_duplicates(&mut pools);

    if pools.is_empty() {
        return Err(NoPools);
    }
    Ok(pools)
}

async fn identify_one(client: &OutboundClient, row: &RegistryRow, language: &str) -> Option<Pool> {
    match attempt_identify(client, row, language).await {
        Some(pool) => Some(pool),
        None if language != FALLBACK_LANGUAGE => {
            tracing::warn!(
                "{} /identify failed in {}; retrying in {}",
                row.private_url,
                language,
                FALLBACK_LANGUAGE
            );
            attempt_identify(client, row, FALLBACK_LANGUAGE).await
        }
        None => {
            tracing::warn!("{} failed identification; dropping", row.private_url);
            None
        }
    }
}

async fn attempt_identify(
    client: &OutboundClient,
    row: &RegistryRow,
    language: &str,
) -> Option<Pool> {
    let url = format!("{}/identify", row.private_url);
    let resp = client.get(&url, &[("Accept-Language", language)]).await;
    if !resp.is_ok() {
        tracing::warn!("{} returned {}:{}", url, resp.status_code, resp.body);
        return None;
    }
    match serde_json::from_str::<IdentifyResponse>(&resp.body) {
        Ok(identity) => Some(Pool::from_identity(row, identity, language)),
        Err(err) => {
            tracing::warn!("Unable to parse identity from {}: {}", url, err);
            None
        }
    }
}

/// `id` and `public_url` are unique across the active set; the first pool by
/// sequence wins and later duplicates are dropped.
pub(crate) fn drop_duplicates(pools: &mut Vec<Pool>) {
    let mut seen: HashSet<String> = HashSet::new();
    pools.retain(|pool| {
        if seen.contains(&pool.id) || seen.contains(&pool.public_url) {
            tracing::warn!("Dropping duplicate pool {} ({})", pool.id, pool.public_url);
            return false;
        }
        seen.insert(pool.id.clone());
        seen.insert(pool.public_url.clone());
        true
    });
}
