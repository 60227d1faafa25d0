//! Trail endpoints: routes and their signals

use super::documents;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use std::sync::Arc;

pub async fn trails(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    documents::parents(&state.trail).await
}

pub async fn trail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    documents::parent(&state.trail, &id).await
}

pub async fn signals_count(State(state): State<Arc<AppState>>) -> ApiResult<String> {
    documents::count(&state.trail).await
}

/// At most 2000 signals of the trail.
pub async fn signals_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    documents::children(&state.trail, &id).await
}

pub async fn signals_by_amount(
    State(state): State<Arc<AppState>>,
    Path((id, amount)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    documents::children_by_amount(&state.trail, &id, &amount).await
}

pub async fn signals_by_dtg(
    State(state): State<Arc<AppState>>,
    Path((id, d1, d2)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    documents::children_between(&state.trail, &id, &d1, &d2).await
}

pub async fn signals_in_polygon(
    State(state): State<Arc<AppState>>,
    Path((id, coords)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    documents::children_within(&state.trail, &id, &coords).await
}
