//! Node configuration, populated from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ddvalidator::DEFAULT_ROOT_TYPE;

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "DDV_CURRENT_VERSION is not set; set it to the default rule set version, e.g. DDV_CURRENT_VERSION=2024.01"
    )]
    MissingCurrentVersion,

    #[error("DDV_BIND must be a valid socket address (e.g. 0.0.0.0:3000), got {0:?}")]
    InvalidBind(String),

    #[error("DDV_FETCH_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    #[error("DDV_MAX_DOCUMENT_BYTES must be a positive number of bytes, got {0:?}")]
    InvalidDocumentLimit(String),
}

/// Default cap on a fetched metadata document: 16 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

/// Runtime configuration for a validation node.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `DDV_BIND` | `0.0.0.0:3000` | TCP socket address to listen on |
/// | `DDV_CURRENT_VERSION` | (required) | Rule set version used when a request names none |
/// | `DDV_RULES_DIR` | `./ValidationFiles` | Directory of `<version>.txt` / `<version>.csv` rule sets |
/// | `DDV_ROOT_TYPE` | `Observation` | Root type inspected in every metadata document |
/// | `DDV_FETCH_TIMEOUT_SECS` | `30` | Timeout for fetching metadata documents |
/// | `DDV_MAX_DOCUMENT_BYTES` | `16777216` | Largest metadata document the node will download |
/// | `DDV_PUBLIC_BASE` | (absent = from `Host`) | Base URL quoted in error messages |
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    pub current_version: String,

    pub rules_dir: PathBuf,

    /// Simple name of the type inspection starts from.
    pub root_type: String,

    pub fetch_timeout: Duration,

    /// Fetches whose body exceeds this many bytes are abandoned.
    pub max_document_bytes: usize,

    /// Externally visible base URL, e.g. `https://validator.example.org`.
    /// `None` means derive it from the request's `Host` header.
    pub public_base: Option<String>,
}

impl NodeConfig {
    /// Defaults for everything but the current version.
    pub fn new(current_version: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            current_version: current_version.into(),
            rules_dir: PathBuf::from("./ValidationFiles"),
            root_type: DEFAULT_ROOT_TYPE.to_string(),
            fetch_timeout: Duration::from_secs(30),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            public_base: None,
        }
    }

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Populate config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let current_version = var("DDV_CURRENT_VERSION")
            .map(|v| v.trim().to_string())
            .ok_or(ConfigError::MissingCurrentVersion)?;
        let mut config = Self::new(current_version);

        if let Some(bind) = var("DDV_BIND") {
            config.bind_addr = bind
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;
        }

        if let Some(dir) = var("DDV_RULES_DIR") {
            config.rules_dir = PathBuf::from(dir);
        }

        if let Some(root) = var("DDV_ROOT_TYPE") {
            config.root_type = root.trim().to_string();
        }

        if let Some(secs) = var("DDV_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidTimeout(secs.clone()))?;
        }

        if let Some(bytes) = var("DDV_MAX_DOCUMENT_BYTES") {
            config.max_document_bytes = bytes
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|b| *b > 0)
                .ok_or_else(|| ConfigError::InvalidDocumentLimit(bytes.clone()))?;
        }

        config.public_base = var("DDV_PUBLIC_BASE").map(|b| b.trim_end_matches('/').to_string());

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_version_is_set() {
        let config = NodeConfig::from_lookup(lookup(&[("DDV_CURRENT_VERSION", "2024.01")])).unwrap();
        assert_eq!(config.current_version, "2024.01");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.rules_dir, PathBuf::from("./ValidationFiles"));
        assert_eq!(config.root_type, "Observation");
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.max_document_bytes, DEFAULT_MAX_DOCUMENT_BYTES);
        assert!(config.public_base.is_none());
    }

    #[test]
    fn missing_or_blank_version_is_an_error() {
        assert!(matches!(
            NodeConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingCurrentVersion)
        ));
        assert!(matches!(
            NodeConfig::from_lookup(lookup(&[("DDV_CURRENT_VERSION", "  ")])),
            Err(ConfigError::MissingCurrentVersion)
        ));
    }

    #[test]
    fn overrides_are_read() {
        let config = NodeConfig::from_lookup(lookup(&[
            ("DDV_CURRENT_VERSION", "v3"),
            ("DDV_BIND", "127.0.0.1:8080"),
            ("DDV_RULES_DIR", "/srv/rules"),
            ("DDV_ROOT_TYPE", "Result"),
            ("DDV_FETCH_TIMEOUT_SECS", "5"),
            ("DDV_MAX_DOCUMENT_BYTES", "4096"),
            ("DDV_PUBLIC_BASE", "https://validator.example.org/"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.rules_dir, PathBuf::from("/srv/rules"));
        assert_eq!(config.root_type, "Result");
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.max_document_bytes, 4096);
        assert_eq!(config.public_base.as_deref(), Some("https://validator.example.org"));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            NodeConfig::from_lookup(lookup(&[
                ("DDV_CURRENT_VERSION", "v3"),
                ("DDV_BIND", "not-an-address"),
            ])),
            Err(ConfigError::InvalidBind(_))
        ));
        assert!(matches!(
            NodeConfig::from_lookup(lookup(&[
                ("DDV_CURRENT_VERSION", "v3"),
                ("DDV_FETCH_TIMEOUT_SECS", "0"),
            ])),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            NodeConfig::from_lookup(lookup(&[
                ("DDV_CURRENT_VERSION", "v3"),
                ("DDV_MAX_DOCUMENT_BYTES", "lots"),
            ])),
            Err(ConfigError::InvalidDocumentLimit(_))
        ));
    }
}
