//! World Port Index endpoints.
//!
//! Lookup failures answer `200` with a `null` body; the failure itself is
//! only visible in the logs.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use geostack::shape::ports_count_body;
use geostack_types::port::Port;
use serde_json::Value;
use std::sync::Arc;

/// GET /api/ports_count/
pub async fn ports_count(State(state): State<Arc<AppState>>) -> Json<Value> {
    let Some(ports) = &state.ports else {
        tracing::error!("port count requested but port lookups are disabled");
        return Json(Value::Null);
    };

    match ports.count().await {
        Ok(count) => Json(ports_count_body(count)),
        Err(e) => {
            tracing::error!("port count failed: {}", e);
            Json(Value::Null)
        }
    }
}

/// GET /api/ports/
pub async fn ports(State(state): State<Arc<AppState>>) -> Json<Option<Vec<Port>>> {
    let Some(ports) = &state.ports else {
        tracing::error!("ports requested but port lookups are disabled");
        return Json(None);
    };

    match ports.all().await {
        Ok(rows) => Json(Some(rows)),
        Err(e) => {
            tracing::error!("port listing failed: {}", e);
            Json(None)
        }
    }
}
