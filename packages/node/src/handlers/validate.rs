//! Metadata validation handler: `GET /validate?url=<service root>&version=<v>`.
//!
//! Checks run in a fixed order and the first failure is returned:
//!
//! 1. the URL (with `/$metadata` appended) must be an absolute http(s) URL;
//! 2. the requested version (default: the current version) must exist;
//! 3. the metadata document must be fetchable;
//! 4. a non-blank document must be well-formed XML without a DTD;
//! 5. the document must be CSDL containing the configured root type.
//!
//! A document that breaks the rule set is a successful request: the response
//! is `200` with `valid: false` and the diagnostics.

use axum::{
    extract::{Query, State},
    http::{header::HOST, HeaderMap},
    Json,
};
use ddvalidator::{
    inspect,
    model::check_well_formed,
    source::{metadata_url, parse_http_url},
    validate, Rule, ValidationReport,
};
use ddvalidator_node_api::{ValidateQuery, ValidationResponse};
use tracing::{debug, info, warn};

use super::AppState;
use crate::error::AppError;
use crate::fetch::FetchError;
use crate::store::StoreError;

/// `GET /validate`
pub async fn validate_metadata(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ValidateQuery>,
) -> Result<Json<ValidationResponse>, AppError> {
    let raw_url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(AppError::InvalidUrl)?;
    let url = metadata_url(raw_url);
    let target = parse_http_url(&url).ok_or(AppError::InvalidUrl)?;

    let version = query
        .version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| state.config.current_version.clone());

    let rules = match state.store.load(&version).await {
        Ok(rules) => rules,
        Err(StoreError::NotFound(_)) => {
            return Err(AppError::UnknownVersion {
                version,
                base: base_url(&state, &headers),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let document = state.fetcher.fetch(target).await.map_err(|e| {
        warn!(%url, error = %e, "metadata document not accessible");
        match e {
            FetchError::TooLarge { limit } => AppError::SourceUnavailable(format!(
                "Metadata document at {url} exceeds the limit of {limit} bytes"
            )),
            _ => AppError::SourceUnavailable(format!("URL {url} is not accessible")),
        }
    })?;

    // Parsing and walking are CPU bound; keep them off the runtime workers.
    let root_type = state.config.root_type.clone();
    let task_url = url.clone();
    let (types, report) = tokio::task::spawn_blocking(move || {
        check_and_validate(&task_url, &document, &root_type, &rules)
    })
    .await
    .map_err(|e| AppError::Internal(format!("validation task failed: {e}")))??;

    info!(
        %url,
        %version,
        types,
        diagnostics = report.len(),
        "validated metadata document"
    );
    Ok(Json(ValidationResponse::from_report(url, version, &report)))
}

/// Safety gate, inspection and validation of one fetched document. Returns
/// the catalog size alongside the report.
fn check_and_validate(
    url: &str,
    document: &str,
    root_type: &str,
    rules: &[Rule],
) -> Result<(usize, ValidationReport), AppError> {
    // Blank documents fall through to the schema check, which names the problem.
    if !document.trim().is_empty() {
        check_well_formed(document).map_err(|e| {
            debug!(%url, error = %e, "rejecting metadata document");
            AppError::UnsafeContent
        })?;
    }

    let catalog = inspect(document, root_type)?;
    Ok((catalog.len(), validate(rules, &catalog)))
}

fn base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = &state.config.public_base {
        return base.clone();
    }
    headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::NodeConfig;
    use crate::router::build_router;
    use crate::store::memory::MemoryStore;

    use super::*;

    const METADATA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="DigitaleDelta">
      <EntityType Name="Observation">
        <Key><PropertyRef Name="Id"/></Key>
        <Property Name="Id" Type="Edm.String" Nullable="false"/>
        <Property Name="ResultTime" Type="Edm.DateTimeOffset" Nullable="false"/>
      </EntityType>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

    const HEADER: &str = "Entity,EntityRequired,Property,Type,PropertyRequired\n";

    fn build_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_csv(
                "v1",
                &format!("{HEADER}DigitaleDelta.Observation,True,Id,Edm.String,True\n"),
            )
            .unwrap();
        store
            .insert_csv(
                "v2",
                &format!("{HEADER}DigitaleDelta.Observation,True,Id,Edm.Guid,True\n"),
            )
            .unwrap();
        build_router(store, NodeConfig::new("v1")).unwrap()
    }

    /// Serve `body` at `/odata/$metadata` on an ephemeral port; returns the
    /// service root URL.
    async fn serve_metadata(body: &'static str) -> String {
        let app = Router::new()
            .route("/odata/$metadata", get(move || async move { body }))
            .route(
                "/broken/$metadata",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/odata")
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .uri(uri)
            .header("host", "validator.test")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn matching_document_is_valid() {
        let root = serve_metadata(METADATA).await;
        let (status, body) = get_json(build_app(), &format!("/validate?url={root}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["version"], "v1");
        assert_eq!(body["url"], format!("{root}/$metadata"));
        assert_eq!(body["diagnostics"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn rule_violation_is_200_with_diagnostics() {
        let root = serve_metadata(METADATA).await;
        let (status, body) =
            get_json(build_app(), &format!("/validate?url={root}/$metadata&version=v2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(
            body["diagnostics"],
            serde_json::json!(["Property Id in entity DigitaleDelta.Observation has incorrect type."])
        );
    }

    #[tokio::test]
    async fn missing_or_non_http_url_is_invalid() {
        for uri in ["/validate", "/validate?url=", "/validate?url=ftp://example.org/odata", "/validate?url=not%20a%20url"] {
            let (status, body) = get_json(build_app(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["code"], "invalid_url");
            assert_eq!(body["error"], "Invalid URL");
        }
    }

    #[tokio::test]
    async fn unknown_version_names_the_versions_endpoint() {
        let (status, body) = get_json(
            build_app(),
            "/validate?url=http://127.0.0.1:9/odata&version=v9",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "unknown_version");
        assert_eq!(
            body["error"],
            "Unknown version: v9. Check http://validator.test/versions for supported versions."
        );
    }

    #[tokio::test]
    async fn unreachable_source_is_reported() {
        let root = serve_metadata(METADATA).await;
        let broken = root.replace("/odata", "/broken");
        let (status, body) = get_json(build_app(), &format!("/validate?url={broken}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "source_unavailable");
        assert_eq!(body["error"], format!("URL {broken}/$metadata is not accessible"));
    }

    #[tokio::test]
    async fn non_xml_content_is_unsafe() {
        let root = serve_metadata("<script>alert(1)</script><p>").await;
        let (status, body) = get_json(build_app(), &format!("/validate?url={root}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "unsafe_content");
        assert_eq!(body["error"], crate::error::UNSAFE_CONTENT_MESSAGE);
    }

    #[tokio::test]
    async fn dtd_is_unsafe() {
        let root = serve_metadata(
            r#"<?xml version="1.0"?><!DOCTYPE x [<!ENTITY a "b">]><x>&a;</x>"#,
        )
        .await;
        let (status, body) = get_json(build_app(), &format!("/validate?url={root}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "unsafe_content");
    }

    #[tokio::test]
    async fn xml_that_is_not_csdl_is_a_schema_error() {
        let root = serve_metadata("<html><body/></html>").await;
        let (status, body) = get_json(build_app(), &format!("/validate?url={root}")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "schema_error");
    }

    #[tokio::test]
    async fn blank_document_is_a_schema_error() {
        let root = serve_metadata("  ").await;
        let (status, body) = get_json(build_app(), &format!("/validate?url={root}")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "schema_error");
    }

    #[tokio::test]
    async fn oversized_document_is_refused() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_csv("v1", &format!("{HEADER}DigitaleDelta.Observation,True,Id,Edm.String,True\n"))
            .unwrap();
        let mut config = NodeConfig::new("v1");
        config.max_document_bytes = 64;
        let app = build_router(store, config).unwrap();

        let root = serve_metadata(METADATA).await;
        let (status, body) = get_json(app, &format!("/validate?url={root}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "source_unavailable");
        assert_eq!(
            body["error"],
            format!("Metadata document at {root}/$metadata exceeds the limit of 64 bytes")
        );
    }

    #[tokio::test]
    async fn deeply_nested_type_chain_is_validated() {
        const DEPTH: usize = 10_000;
        let types: String = (0..DEPTH)
            .map(|i| {
                format!(
                    r#"<ComplexType Name="T{i}"><Property Name="Next" Type="DigitaleDelta.T{}"/></ComplexType>"#,
                    i + 1
                )
            })
            .collect();
        let document = format!(
            r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="DigitaleDelta">
      <EntityType Name="Observation">
        <Key><PropertyRef Name="Id"/></Key>
        <Property Name="Id" Type="Edm.String" Nullable="false"/>
        <Property Name="Chain" Type="DigitaleDelta.T0"/>
      </EntityType>
      {types}
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#
        );
        let root = serve_metadata(Box::leak(document.into_boxed_str())).await;

        let (status, body) = get_json(build_app(), &format!("/validate?url={root}")).await;
        assert_eq!(status, StatusCode::OK);
        // Chain types are not required, so only Observation is checked.
        assert_eq!(body["valid"], true);
        assert_eq!(body["diagnostics"], serde_json::json!([]));
    }
}
