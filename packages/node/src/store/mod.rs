//! Rule set storage for the validation node.
//!
//! The [`RuleSetStore`] trait is the contract between the HTTP handlers and
//! wherever versioned rule sets live. Each version is one rule set, named by
//! a short string such as `2024.01`.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`DirectoryStore`] | Production; one CSV file per version on disk |
//! | [`MemoryStore`] | Tests, conformance suite |
//!
//! [`DirectoryStore`]: directory::DirectoryStore
//! [`MemoryStore`]: memory::MemoryStore

pub mod directory;
pub mod memory;

use async_trait::async_trait;
use ddvalidator::{Rule, RuleError};

/// Errors that store operations can return.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No rule set with this version exists.
    #[error("unknown rule set version {0:?}")]
    NotFound(String),

    /// The rule set exists but cannot be parsed.
    #[error("rule set {version:?} is invalid: {source}")]
    Invalid {
        version: String,
        #[source]
        source: RuleError,
    },

    /// The backing store could not be read.
    #[error("rule set storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of versioned rule sets.
///
/// Implementations must be `Send + Sync + 'static` so they can be held in an
/// `Arc<dyn RuleSetStore>`.
#[async_trait]
pub trait RuleSetStore: Send + Sync + 'static {
    /// Every available version, sorted ascending.
    async fn versions(&self) -> Result<Vec<String>, StoreError>;

    /// The parsed rules of `version`, or [`StoreError::NotFound`].
    async fn load(&self, version: &str) -> Result<Vec<Rule>, StoreError>;
}
