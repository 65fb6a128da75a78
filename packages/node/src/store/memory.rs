//! In-memory rule sets.
//!
//! All data is held in RAM behind a [`RwLock`] and is lost when the process
//! exits. Use this for tests and the conformance suite.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use ddvalidator::{read_rules, Rule, RuleError};

use super::{RuleSetStore, StoreError};

/// Thread-safe, in-memory implementation of [`RuleSetStore`].
#[derive(Default)]
pub struct MemoryStore {
    // BTreeMap keeps versions sorted for `versions()`.
    sets: RwLock<BTreeMap<String, Vec<Rule>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a rule set.
    pub fn insert(&self, version: impl Into<String>, rules: Vec<Rule>) {
        self.sets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(version.into(), rules);
    }

    /// Add or replace a rule set from CSV text.
    pub fn insert_csv(&self, version: impl Into<String>, csv: &str) -> Result<(), RuleError> {
        let rules = read_rules(csv)?;
        self.insert(version, rules);
        Ok(())
    }
}

#[async_trait]
impl RuleSetStore for MemoryStore {
    async fn versions(&self) -> Result<Vec<String>, StoreError> {
        let sets = self.sets.read().unwrap_or_else(|p| p.into_inner());
        Ok(sets.keys().cloned().collect())
    }

    async fn load(&self, version: &str) -> Result<Vec<Rule>, StoreError> {
        let sets = self.sets.read().unwrap_or_else(|p| p.into_inner());
        sets.get(version)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(version.to_string()))
    }
}
