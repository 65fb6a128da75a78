//! `ddv-node`: HTTP service that validates OData metadata documents
//! against versioned rule sets.
//!
//! # Quick start
//!
//! ```sh
//! # Rule sets in ./ValidationFiles, default version 2024.01:
//! DDV_CURRENT_VERSION=2024.01 ddv-node
//!
//! # Custom bind address and rule set directory:
//! DDV_BIND=127.0.0.1:8080 DDV_RULES_DIR=/srv/ddv/rules DDV_CURRENT_VERSION=2024.01 ddv-node
//! ```
//!
//! # Environment variables
//!
//! See [`NodeConfig`] for the full list.

use std::process::ExitCode;
use std::sync::Arc;

use ddvalidator_node::{build_router, DirectoryStore, NodeConfig, RuleSetStore};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ddvalidator_node=info,ddvalidator=warn,tower_http=debug".into()
            }),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = NodeConfig::from_env()?;

    let store = DirectoryStore::new(&config.rules_dir);
    match store.versions().await {
        Ok(versions) if versions.contains(&config.current_version) => {
            tracing::info!(
                "rule sets: {} version(s) in {}",
                versions.len(),
                config.rules_dir.display()
            );
        }
        Ok(_) => tracing::warn!(
            "current version {} has no rule set in {}",
            config.current_version,
            config.rules_dir.display()
        ),
        Err(e) => tracing::warn!("cannot list rule sets in {}: {e}", config.rules_dir.display()),
    }

    let bind_addr = config.bind_addr;
    let app = build_router(Arc::new(store), config)?;

    tracing::info!("listening on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;

    axum::serve(listener, app).await?;
    Ok(())
}
