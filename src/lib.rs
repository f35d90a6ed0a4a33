//! Context-keyed ad selection service.
//!
//! Serves a small list of ads for a set of context keys: ads whose category
//! contains a key, or a random sample of the catalog when nothing matches.
//! Exposes `ads.get` and `health` tools over JSON-RPC 2.0 stdio transport.

pub mod ads;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod protocol;
pub mod server;

pub mod schema;
