//! Outbound HTTP Client Module
//!
//! All pool-facing and suggestor-facing traffic goes through one shared
//! keep-alive transport, wrapped into three tiers that differ only in total
//! per-request timeout:
//!
//! - **fast** (5s): identity probes and external pools, which must stay impatient.
//! - **default** (10s): normal pool searches and the suggestion lookup.
//! - **slow** (30s): background filter refreshes, which tolerate slow pools.
//!
//! Transport failures are shaped into HTTP status codes here so callers only
//! ever deal with one error space (see `TimedResponse`).

pub mod tiered;
