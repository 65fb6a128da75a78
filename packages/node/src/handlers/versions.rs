//! Version listing handlers: `GET /currentversion` and `GET /versions`.

use axum::{extract::State, Json};
use ddvalidator_node_api::{CurrentVersionResponse, VersionsResponse};

use super::AppState;
use crate::error::AppError;

/// `GET /currentversion`
///
/// The rule set version `/validate` uses when the request names none.
pub async fn current_version(State(state): State<AppState>) -> Json<CurrentVersionResponse> {
    Json(CurrentVersionResponse {
        current_version: state.config.current_version.clone(),
    })
}

/// `GET /versions`
pub async fn versions(State(state): State<AppState>) -> Result<Json<VersionsResponse>, AppError> {
    let versions = state.store.versions().await?;
    Ok(Json(VersionsResponse { versions }))
}
