use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::service::context::ServiceContext;
use crate::service::error::ServiceError;

use super::identify::{identify_pools, FALLBACK_LANGUAGE};
use super::registry;
use super::types::Pool;

/// The pool set materialized for one request, plus the language it resolved
/// in. Attached to request extensions by `require_pools`.
#[derive(Clone)]
pub struct PoolContext {
    pub pools: Arc<Vec<Pool>>,
    pub language: String,
}

/// First tag of the Accept-Language header, or the en-US fallback.
pub fn accept_language(headers: &HeaderMap) -> String {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// Materializes the pool set for every request that needs one. No caching:
/// the set is rebuilt per request, and an empty set is a 404 because nothing
/// downstream can proceed without pools.
pub async fn require_pools(
    State(ctx): State<Arc<ServiceContext>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let language = accept_language(request.headers());
    let pools = materialize(&ctx, &language).await?;
    request.extensions_mut().insert(PoolContext {
        pools: Arc::new(pools),
        language,
    });
    Ok(next.run(request).await)
}

/// Registry read plus parallel identification. Shared with the background
/// filter refresher, which runs it in the fallback language.
pub async fn materialize(ctx: &ServiceContext, language: &str) -> Result<Vec<Pool>, ServiceError> {
    let rows = registry::list_enabled(&ctx.db).await?;
    let pools = identify_pools(&ctx.clients, rows, language).await?;
    Ok(pools)
}
