//! Publishes per-app metadata for a workload: identifying env vars plus the
//! hosting node's labels, written to the app meta cache as JSON.

pub mod cache;
pub mod collect;
pub mod config;
pub mod env;
pub mod error;
pub mod meta;
pub mod node;
