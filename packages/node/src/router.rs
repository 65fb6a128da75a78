//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    config::NodeConfig,
    fetch::{FetchError, MetadataFetcher},
    handlers::{validate, versions, AppState},
    store::RuleSetStore,
};

/// Build the complete application router with shared state.
///
/// Fails only if the outbound HTTP client cannot be constructed.
pub fn build_router(
    store: Arc<dyn RuleSetStore>,
    config: NodeConfig,
) -> Result<Router, FetchError> {
    let fetcher = MetadataFetcher::new(config.fetch_timeout, config.max_document_bytes)?;

    let state = AppState {
        store,
        config,
        fetcher,
    };

    Ok(Router::new()
        .route("/currentversion", get(versions::current_version))
        .route("/versions", get(versions::versions))
        .route("/validate", get(validate::validate_metadata))
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::store::memory::MemoryStore;

    fn build_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        store.insert("2024.02", vec![]);
        store.insert("2023.11", vec![]);
        build_router(store, NodeConfig::new("2024.02")).unwrap()
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn current_version_returns_configured_version() {
        let (status, body) = get_body(build_app(), "/currentversion").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"current_version":"2024.02"}"#);
    }

    #[tokio::test]
    async fn versions_are_sorted() {
        let (status, body) = get_body(build_app(), "/versions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"versions":["2023.11","2024.02"]}"#);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _) = get_body(build_app(), "/validate/extra").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
