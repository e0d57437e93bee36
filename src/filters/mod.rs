//! Advanced Search Filter Module
//!
//! Maintains the merged catalog of advanced-search filters shown to clients.
//! A background refresher queries one representative pool per source kind on
//! a fixed cadence, merges their filter lists, and atomically publishes the
//! result. Readers always see either the previous snapshot or a fully merged
//! new one; a refresh that cannot hear from every selected source is
//! abandoned and the old snapshot stays.
//!
//! ## Submodules
//! - **`cache`**: the refresher loop and per-pool fetches.
//! - **`merge`**: the pure cross-source merge (order, labels, bucket sums).
//! - **`types`**: wire and catalog types.
//! - **`handlers`**: the `/api/filters` read endpoint.

pub mod cache;
pub mod handlers;
pub mod merge;
pub mod types;
