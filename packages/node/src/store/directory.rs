//! Directory-backed rule sets.
//!
//! Every `<version>.txt` or `<version>.csv` file directly inside the
//! directory is one rule set. Files are read on every request, so rule sets
//! can be added or replaced without restarting the node.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ddvalidator::{read_rules, Rule};
use tracing::debug;

use super::{RuleSetStore, StoreError};

const EXTENSIONS: [&str; 2] = ["txt", "csv"];

pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `(version, path)` for every rule set file. When both a `.txt` and a
    /// `.csv` exist for one version, the `.txt` wins.
    async fn entries(&self) -> Result<Vec<(String, PathBuf)>, StoreError> {
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        let mut entries: Vec<(String, PathBuf)> = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(version) = rule_set_version(&path) else {
                continue;
            };
            entries.push((version, path));
        }
        entries.sort_by(|(a, pa), (b, pb)| {
            a.cmp(b)
                .then_with(|| extension_rank(pa).cmp(&extension_rank(pb)))
        });
        entries.dedup_by(|(a, _), (b, _)| a == b);
        Ok(entries)
    }
}

#[async_trait]
impl RuleSetStore for DirectoryStore {
    async fn versions(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries().await?.into_iter().map(|(v, _)| v).collect())
    }

    async fn load(&self, version: &str) -> Result<Vec<Rule>, StoreError> {
        // Only files found by listing are ever opened; the version string is
        // never joined onto the directory path.
        let path = self
            .entries()
            .await?
            .into_iter()
            .find(|(v, _)| v == version)
            .map(|(_, p)| p)
            .ok_or_else(|| StoreError::NotFound(version.to_string()))?;

        debug!(version, path = %path.display(), "loading rule set");
        let text = tokio::fs::read_to_string(&path).await?;
        read_rules(&text).map_err(|source| StoreError::Invalid {
            version: version.to_string(),
            source,
        })
    }
}

fn rule_set_version(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if !EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    (!stem.is_empty()).then(|| stem.to_string())
}

fn extension_rank(path: &Path) -> usize {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| EXTENSIONS.iter().position(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(EXTENSIONS.len())
}
