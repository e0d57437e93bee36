//! Service Module
//!
//! Everything the rest of the gateway hangs off: environment configuration,
//! the shared `ServiceContext` (database pool, client tiers, filter cache),
//! the request-level error taxonomy, the small localized message catalog,
//! and the unauthenticated glue endpoints (`/version`, `/healthcheck`).

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod messages;
