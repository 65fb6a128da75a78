//! Outbound retrieval of metadata documents.
//!
//! [`MetadataFetcher`] owns a cloneable [`reqwest::Client`] (which pools
//! connections internally) configured with the node's fetch timeout. A fetch
//! is a single `GET`; there are no retries. Bodies larger than the configured
//! limit are abandoned before they are fully read.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

/// Errors that can occur while fetching a metadata document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request or response failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx HTTP status code.
    #[error("server returned status {0}")]
    BadStatus(u16),

    #[error("document exceeds the limit of {limit} bytes")]
    TooLarge { limit: usize },
}

#[derive(Clone)]
pub struct MetadataFetcher {
    client: Client,
    max_bytes: usize,
}

impl MetadataFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ddvalidator-node/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, max_bytes })
    }

    /// `GET url` and return the body as text.
    pub async fn fetch(&self, url: Url) -> Result<String, FetchError> {
        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let too_large = FetchError::TooLarge {
            limit: self.max_bytes,
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(too_large);
        }

        // Content-Length may be absent or wrong; enforce the cap while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large);
            }
            body.extend_from_slice(&chunk);
        }

        let text = String::from_utf8_lossy(&body).into_owned();
        debug!(%url, bytes = body.len(), "fetched metadata document");
        Ok(text)
    }
}
