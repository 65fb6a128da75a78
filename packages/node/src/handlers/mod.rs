//! HTTP request handlers for the validation node.
//!
//! Handlers are async functions that receive Axum extractors and return
//! `Result<impl IntoResponse, AppError>`.

pub mod validate;
pub mod versions;

use std::sync::Arc;

use crate::{config::NodeConfig, fetch::MetadataFetcher, store::RuleSetStore};

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RuleSetStore>,
    pub config: NodeConfig,
    /// Outbound client for metadata documents. Cheap to clone.
    pub fetcher: MetadataFetcher,
}
