//! Resolve a command-line location (local path or http(s) URL) to text.

use std::path::PathBuf;
use std::time::Duration;

use ddvalidator::source::{is_remote, metadata_url, parse_http_url};
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0} is an invalid URL")]
    InvalidUrl(String),

    #[error("URL {0} is not accessible")]
    NotAccessible(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// What a location points at; decides whether `/$metadata` is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    RuleSet,
    Metadata,
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ddv/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Read `location`. URLs of [`Kind::Metadata`] locations are service
    /// roots and get `/$metadata` appended.
    pub fn load(&self, location: &str, kind: Kind) -> Result<String, FetchError> {
        if !is_remote(location) {
            let path = PathBuf::from(location);
            return std::fs::read_to_string(&path).map_err(|source| FetchError::Io { path, source });
        }

        let target = match kind {
            Kind::Metadata => metadata_url(location),
            Kind::RuleSet => location.trim().to_string(),
        };
        let url = parse_http_url(&target).ok_or_else(|| FetchError::InvalidUrl(location.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text());
        match response {
            Ok(body) => {
                debug!(url = %target, bytes = body.len(), "fetched");
                Ok(body)
            }
            Err(e) => {
                warn!(url = %target, error = %e, "fetch failed");
                Err(FetchError::NotAccessible(location.to_string()))
            }
        }
    }
}
