use std::sync::Arc;
use std::time::Instant;

use axum::extract::Query as QueryParams;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::client::tiered::OutboundClient;
use crate::pools::middleware::PoolContext;
use crate::pools::types::{Pool, PoolSummary};
use crate::query::validator;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceError;
use crate::service::messages::{message, MessageKey};

use super::sort::ResultOrdering;
use super::suggest::spawn_suggestion_task;
use super::types::{PoolResult, SearchRequest, SearchResponse};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub sources: Option<String>,
}

/// Federated search: validate the query, fan out to every non-excluded pool
/// in parallel, collect partial results, order them, and respond. A single
/// pool failing never fails the request.
pub async fn handle_search(
    Extension(ctx): Extension<Arc<ServiceContext>>,
    Extension(pool_ctx): Extension<PoolContext>,
    QueryParams(params): QueryParams<SearchParams>,
    headers: HeaderMap,
    Json(req): Json<SearchRequest>,
) -> Result<Response, ServiceError> {
    let language = pool_ctx.language.clone();
    tracing::info!("Search request: [{}]", req.query);

    if let Err(detail) = validator::validate(&req.query) {
        tracing::warn!("Query [{}] is not valid: {}", req.query, detail);
        return Err(ServiceError::BadRequest {
            message: message(&language, MessageKey::BadSearch).to_string(),
            details: detail,
        });
    }

    let prefs = req.preferences.clone();
    if prefs.is_excluded(&prefs.target_pool) {
        tracing::warn!("Target pool {} is also excluded", prefs.target_pool);
        return Err(ServiceError::BadRequest {
            message: message(&language, MessageKey::TargetExcluded).to_string(),
            details: String::new(),
        });
    }

    let pools = pool_ctx.pools.clone();
    let mut out = SearchResponse::new(req.clone());
    // clients see the full set they could have hit, exclusions included
    out.pools = pools.iter().map(PoolSummary::from).collect();

    let target_pool = pools.iter().find(|pool| pool.matches(&prefs.target_pool));
    let target_url = target_pool
        .map(|pool| pool.public_url.clone())
        .unwrap_or_default();
    if !prefs.target_pool.is_empty() && target_pool.is_none() {
        tracing::warn!("Target pool {} is not in the active set", prefs.target_pool);
        out.warnings
            .push(message(&language, MessageKey::TargetInactive).to_string());
    }

    let queried: Vec<&Pool> = pools
        .iter()
        .filter(|pool| {
            let excluded = prefs.exclude_pool.iter().any(|entry| pool.matches(entry));
            if excluded {
                tracing::info!("Skipping excluded pool {}", pool.id);
            }
            !excluded
        })
        .collect();

    let start = Instant::now();

    let suggestions_rx = spawn_suggestion_task(
        ctx.clients.default_tier(),
        ctx.suggestor_url.clone(),
        req.query.clone(),
    );

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let (tx, mut rx) = mpsc::channel::<PoolResult>(queried.len().max(1));
    for pool in &queried {
        // external pools get the impatient client
        let client = if pool.external {
            ctx.clients.fast()
        } else {
            ctx.clients.default_tier()
        };
        let task = PoolSearch {
            client,
            service_url: pool.public_url.clone(),
            private_url: pool.private_url.clone(),
            pool_id: pool.id.clone(),
            body: req.shaped_for(&pool.id),
            authorization: authorization.clone(),
            accept_language: accept_language.clone(),
        };
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = task.run().await;
            // exactly one completion per dispatched pool keeps the drain bounded
            let _ = tx.send(result).await;
        });
    }

    let mut content_language = String::new();
    for _ in 0..queried.len() {
        let Some(result) = rx.recv().await else { break };
        if content_language.is_empty() && !result.content_language.is_empty() {
            content_language = result.content_language.clone();
        }
        out.absorb(result);
    }

    out.suggestions = suggestions_rx.await.unwrap_or_default();

    // wall time of the whole fan-out; the slowest pool dominates
    out.total_time_ms = start.elapsed().as_millis() as i64;

    let ordering = ResultOrdering::for_request(params.sources.as_deref(), &pools, &target_url);
    ordering.sort(&mut out.results);

    let mut response = (StatusCode::OK, Json(out)).into_response();
    if !content_language.is_empty() {
        if let Ok(value) = header::HeaderValue::from_str(&content_language) {
            response
                .headers_mut()
                .insert(header::CONTENT_LANGUAGE, value);
        }
    }
    Ok(response)
}

/// One per-pool search task. Always produces exactly one result, success or
/// failure, so the coordinator's drain stays bounded.
struct PoolSearch {
    client: OutboundClient,
    service_url: String,
    private_url: String,
    pool_id: String,
    body: SearchRequest,
    authorization: Option<String>,
    accept_language: Option<String>,
}

impl PoolSearch {
    async fn run(self) -> PoolResult {
        let url = format!("{}/api/search?debug=1", self.private_url);
        tracing::info!("POST search to {}", url);

        let mut headers: Vec<(&str, &str)> = Vec::new();
        if let Some(auth) = self.authorization.as_deref() {
            headers.push(("Authorization", auth));
        }
        if let Some(lang) = self.accept_language.as_deref() {
            headers.push(("Accept-Language", lang));
        }

        let resp = self.client.post_json(&url, &self.body, &headers).await;

        if resp.transport_failure {
            let status_message = match resp.status_code {
                408 => format!("{} search timed out", self.private_url),
                503 => format!("{} is offline", self.private_url),
                _ => resp.body,
            };
            return PoolResult::failed(
                &self.service_url,
                &self.pool_id,
                resp.elapsed_ms,
                resp.status_code,
                status_message,
            );
        }

        if resp.status_code != 200 {
            return PoolResult::failed(
                &self.service_url,
                &self.pool_id,
                resp.elapsed_ms,
                resp.status_code,
                resp.body,
            );
        }

        match serde_json::from_str::<PoolResult>(&resp.body) {
            Ok(mut result) => {
                result.service_url = self.service_url;
                result.pool_name = self.pool_id;
                result.elapsed_ms = resp.elapsed_ms;
                result.status_code = 200;
                if let Some(lang) = resp.content_language {
                    result.content_language = lang;
                }
                result
            }
            Err(err) => {
                tracing::error!(
                    "Unable to parse search response from {}: {}",
                    self.private_url,
                    err
                );
                PoolResult::failed(
                    &self.service_url,
                    &self.pool_id,
                    resp.elapsed_ms,
                    500,
                    "Malformed search response".to_string(),
                )
            }
        }
    }
}
