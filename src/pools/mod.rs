//! Search Pool Module
//!
//! A pool is a backend search service behind the common HTTP contract. This
//! module owns the full pool lifecycle for a request:
//!
//! 1. **Registry**: the authoritative list of enabled pools, read from the
//!    `sources` table ordered by sequence.
//! 2. **Identification**: each registry entry's `/identify` endpoint is probed
//!    in parallel with language fallback to build the in-memory pool set.
//! 3. **Context**: middleware materializes the pool set for every request
//!    that needs one and attaches it to the request extensions.
//!
//! Pool sets are per-request; nothing here outlives the response. Staleness
//! is traded away for freshness and simplicity.

pub mod handlers;
pub mod identify;
pub mod middleware;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;
