//! Federated Search Module
//!
//! The core of the gateway: one client query fans out in parallel to every
//! non-excluded pool, partial results are collected with per-pool timeouts
//! and failure tolerance, and the merged response is ordered by one of three
//! strategies.
//!
//! ## Flow
//! 1. Validate the query grammar; reject before any outbound traffic.
//! 2. Resolve preferences: a target pool bubbles to the top, excluded pools
//!    are listed but never queried, and a target that is also excluded is a
//!    client error.
//! 3. Dispatch the suggestion lookup and one shaped search per pool; every
//!    task writes exactly one completion so the collection loop is bounded.
//! 4. Fold completions into the aggregate in arrival order, then sort.
//!
//! A single pool failing never fails the request; it becomes a warning and a
//! non-200 entry in the results.
//!
//! ## Submodules
//! - **`types`**: client request/response and pool envelope wire types.
//! - **`handlers`**: the `/api/search` aggregator.
//! - **`sort`**: the by-sequence / by-name / by-confidence orderings.
//! - **`suggest`**: the concurrent suggestion-service lookup.

pub mod handlers;
pub mod sort;
pub mod suggest;
pub mod types;

#[cfg(test)]
mod tests;
