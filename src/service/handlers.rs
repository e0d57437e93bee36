use std::collections::HashMap;
use std::sync::Arc;

use axum::{Extension, Json};
use serde::Serialize;

use super::context::ServiceContext;

#[derive(Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub build: String,
}

/// Service build info. The deploy pipeline drops a build tag next to the
/// binary; absent one, the build reads "unknown".
pub async fn handle_version(Extension(ctx): Extension<Arc<ServiceContext>>) -> Json<VersionInfo> {
    let build = std::fs::read_to_string("buildtag.txt")
        .map(|tag| tag.trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    Json(VersionInfo {
        version: ctx.version.clone(),
        build,
    })
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Component health: the registry store and the suggestion service. The
/// endpoint itself always answers 200; unhealthy components are flagged in
/// the body.
pub async fn handle_healthcheck(
    Extension(ctx): Extension<Arc<ServiceContext>>,
) -> Json<HashMap<&'static str, ComponentHealth>> {
    let mut health = HashMap::new();

    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sources")
        .fetch_one(&ctx.db)
        .await
    {
        Ok(_) => {
            health.insert(
                "postgres",
                ComponentHealth {
                    healthy: true,
                    message: None,
                },
            );
        }
        Err(err) => {
            tracing::error!("Postgres healthcheck failed: {}", err);
            health.insert(
                "postgres",
                ComponentHealth {
                    healthy: false,
                    message: Some(err.to_string()),
                },
            );
        }
    }

    let version_url = format!("{}/version", ctx.suggestor_url);
    let resp = ctx.clients.fast().get(&version_url, &[]).await;
    if resp.is_ok() {
        health.insert(
            "suggestor",
            ComponentHealth {
                healthy: true,
                message: None,
            },
        );
    } else {
        health.insert(
            "suggestor",
            ComponentHealth {
                healthy: false,
                message: Some(resp.body),
            },
        );
    }

    Json(health)
}
