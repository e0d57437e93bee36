use std::sync::Arc;

use axum::{Extension, Json};

use crate::service::context::ServiceContext;

use super::types::QueryFilter;

/// The latest merged advanced-search filter catalog. Reads never block the
/// background refresher.
pub async fn handle_get_filters(
    Extension(ctx): Extension<Arc<ServiceContext>>,
) -> Json<Vec<QueryFilter>> {
    let snapshot = ctx.filter_cache.current();
    Json((*snapshot).clone())
}
