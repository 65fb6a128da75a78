//! Public surface for the `ddvalidator-node` crate.
//!
//! Exposes the router builder, config and store types so that external
//! crates (e.g. the conformance test suite) can spin up an in-process node
//! without spawning a subprocess.

pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod router;
pub mod store;

pub use config::{ConfigError, NodeConfig};
pub use router::build_router;
pub use store::{directory::DirectoryStore, memory::MemoryStore, RuleSetStore, StoreError};
