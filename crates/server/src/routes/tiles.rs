use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use geostack::TileIndexError;
use std::sync::Arc;

/// GET /api/get_tilestache_entries/
///
/// Paragraph texts of the tile server's index page.
pub async fn entries(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let tiles = state.tiles.as_ref().ok_or(TileIndexError::NotConfigured)?;
    Ok(Json(tiles.entries().await?))
}
