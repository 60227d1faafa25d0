//! Crane endpoints: trackers and their transmissions

use super::documents;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use std::sync::Arc;

/// GET /api/trackers/
pub async fn trackers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    documents::parents(&state.crane).await
}

/// GET /api/trackers/:id
pub async fn tracker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    documents::parent(&state.crane, &id).await
}

/// GET /api/transmissions_count/
pub async fn transmissions_count(State(state): State<Arc<AppState>>) -> ApiResult<String> {
    documents::count(&state.crane).await
}

/// GET /api/transmissions_by_id/:id
///
/// At most 100 transmissions of the tracker.
pub async fn transmissions_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    documents::children(&state.crane, &id).await
}

/// GET /api/transmissions_by_amount/:id/:amount
pub async fn transmissions_by_amount(
    State(state): State<Arc<AppState>>,
    Path((id, amount)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    documents::children_by_amount(&state.crane, &id, &amount).await
}

/// GET /api/transmissions_by_dtg/:id/:d1/:d2
pub async fn transmissions_by_dtg(
    State(state): State<Arc<AppState>>,
    Path((id, d1, d2)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    documents::children_between(&state.crane, &id, &d1, &d2).await
}

/// GET /api/transmissions_in_polygon/:id/:coords
pub async fn transmissions_in_polygon(
    State(state): State<Arc<AppState>>,
    Path((id, coords)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    documents::children_within(&state.crane, &id, &coords).await
}
