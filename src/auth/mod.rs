//! Authentication Module
//!
//! Inbound requests present a bearer JWT signed with the shared HMAC secret;
//! the validated claims are attached to request extensions for downstream
//! handlers. The same secret also signs the short-lived machine-to-machine
//! tokens the filter refresher presents to pools.

pub mod claims;
pub mod middleware;
