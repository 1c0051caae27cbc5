//! Report listing and access routes.

use crate::auth::{AppState, AuthToken};
use crate::error::ApiError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use reportgate_directory::ReportDetails;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Lists the report identifiers visible to the session.
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthToken(token): AuthToken,
) -> Result<Json<BTreeSet<String>>, ApiError> {
    let reports = state.gateway.list_reports(&token).await?;
    Ok(Json(reports))
}

/// Lists the visible reports keyed by identifier, with their details.
pub async fn detailed(
    State(state): State<Arc<AppState>>,
    AuthToken(token): AuthToken,
) -> Result<Json<BTreeMap<String, ReportDetails>>, ApiError> {
    let reports = state.gateway.list_reports_detailed(&token).await?;
    Ok(Json(reports))
}

/// Succeeds with no content if the session may access the report.
pub async fn access(
    State(state): State<Arc<AppState>>,
    AuthToken(token): AuthToken,
    Path(report_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.gateway.can_access_report(&token, &report_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
