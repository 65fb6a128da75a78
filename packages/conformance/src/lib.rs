//! Shared helpers for the validation service conformance test suite.
//!
//! Provides [`spawn_node`], which binds a `TcpListener` on an ephemeral port
//! and serves an in-process node backed by a [`MemoryStore`], and
//! [`spawn_metadata_server`], which plays the OData service whose metadata
//! is being validated.

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use ddvalidator_node::{build_router, config::NodeConfig, MemoryStore, RuleSetStore};

/// The reference Digitale Delta metadata document.
pub const DIGITALE_DELTA: &str = include_str!("../../core/testdata/digitale_delta.xml");

/// Version every node spawned here uses as its current version.
pub const CURRENT_VERSION: &str = "2024.01";

/// Start an ephemeral in-process node and return `(base_url, store)`.
///
/// The returned `Arc<MemoryStore>` is the store the node reads, so tests can
/// add rule sets without going through the file system.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound or the node fails to start.
pub async fn spawn_node() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let base = spawn_node_with(Arc::clone(&store) as Arc<dyn RuleSetStore>).await;
    (base, store)
}

/// Start an ephemeral in-process node over an arbitrary store.
pub async fn spawn_node_with(store: Arc<dyn RuleSetStore>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let base_url = format!("http://{addr}");

    let mut config = NodeConfig::new(CURRENT_VERSION);
    config.bind_addr = addr;
    config.public_base = Some(base_url.clone());
    config.fetch_timeout = std::time::Duration::from_secs(5);
    let router = build_router(store, config).expect("build router");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance node error");
    });

    base_url
}

/// Serve each `(service, body)` pair as `/<service>/$metadata` on an
/// ephemeral port and return the server's base URL. `/failing/$metadata`
/// always answers `500`.
pub async fn spawn_metadata_server(documents: Vec<(&'static str, &'static str)>) -> String {
    let mut app = Router::new().route(
        "/failing/$metadata",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "unavailable") }),
    );
    for (service, body) in documents {
        app = app.route(
            &format!("/{service}/$metadata"),
            get(move || async move { ([("content-type", "application/xml")], body) }),
        );
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("metadata server error");
    });
    format!("http://{addr}")
}
