//! Federated Search Gateway Library
//!
//! This library crate defines the core modules of the search gateway. It
//! serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The gateway is composed of loosely coupled subsystems:
//!
//! - **`auth`**: Bearer JWT validation for inbound requests and short-lived
//!   machine-to-machine tokens for the gateway's own pool-facing calls.
//! - **`client`**: The tiered outbound HTTP clients (fast/default/slow) on a
//!   shared keep-alive transport, with transport-error shaping.
//! - **`filters`**: The background-refreshed, cross-source merged catalog of
//!   advanced-search filters.
//! - **`pools`**: The authoritative pool registry, the parallel identity
//!   resolver, and the per-request pool context middleware.
//! - **`query`**: The search query grammar validator.
//! - **`search`**: The fan-out search aggregator, result orderings, and the
//!   suggestion lookup.
//! - **`service`**: Configuration, shared context, error taxonomy, localized
//!   messages, and the version/health endpoints.

pub mod auth;
pub mod client;
pub mod filters;
pub mod pools;
pub mod query;
pub mod search;
pub mod service;
