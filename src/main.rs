use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::{middleware, Extension, Router};

use search_gateway::auth::middleware::require_auth;
use search_gateway::filters::cache::FilterCache;
use search_gateway::filters::handlers::handle_get_filters;
use search_gateway::pools::handlers::handle_get_pools;
use search_gateway::pools::middleware::require_pools;
use search_gateway::search::handlers::handle_search;
use search_gateway::service::config::ServiceConfig;
use search_gateway::service::context::ServiceContext;
use search_gateway::service::handlers::{handle_healthcheck, handle_version};

/// Version of the service
const VERSION: &str = "1.0.0";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("===> search gateway v{} starting up <===", VERSION);

    // Load config and build the shared context. Any issues are fatal.
    let cfg = ServiceConfig::load()?;
    let ctx = ServiceContext::initialize(VERSION, &cfg).await?;

    // Background filter refresher; first refresh fires immediately.
    FilterCache::spawn(ctx.clone());

    tracing::info!("Setup routes...");

    // pools and search need the materialized pool set; filters only reads
    // the cache
    let pooled_api = Router::new()
        .route("/pools", get(handle_get_pools))
        .route("/search", post(handle_search))
        .layer(middleware::from_fn_with_state(ctx.clone(), require_pools));

    let api = Router::new()
        .merge(pooled_api)
        .route("/filters", get(handle_get_filters))
        .layer(middleware::from_fn_with_state(ctx.clone(), require_auth));

    let app = Router::new()
        .route("/version", get(handle_version))
        .route("/healthcheck", get(handle_healthcheck))
        .nest("/api", api)
        .layer(Extension(ctx.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("Start service v{} on {}", VERSION, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
