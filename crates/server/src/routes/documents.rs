//! Handlers shared by the crane and trail datasets.
//!
//! Both datasets expose the same seven read operations under different
//! paths; the dataset modules only pick the repository.

use crate::error::ApiResult;
use axum::Json;
use geostack::Repository;
use geostack::shape::{count_body, documents_to_json};
use serde_json::Value;

pub(super) async fn parents(repository: &Repository) -> ApiResult<Json<Value>> {
    let documents = repository.parents().await?;
    Ok(Json(documents_to_json(documents)))
}

pub(super) async fn parent(repository: &Repository, id: &str) -> ApiResult<Json<Value>> {
    let documents = repository.parent(id).await?;
    Ok(Json(documents_to_json(documents)))
}

pub(super) async fn count(repository: &Repository) -> ApiResult<String> {
    Ok(count_body(repository.count_children().await?))
}

pub(super) async fn children(repository: &Repository, id: &str) -> ApiResult<Json<Value>> {
    let documents = repository.children(id).await?;
    Ok(Json(documents_to_json(documents)))
}

pub(super) async fn children_by_amount(
    repository: &Repository,
    id: &str,
    amount: &str,
) -> ApiResult<Json<Value>> {
    let documents = repository.children_by_amount(id, amount).await?;
    Ok(Json(documents_to_json(documents)))
}

pub(super) async fn children_between(
    repository: &Repository,
    id: &str,
    from: &str,
    to: &str,
) -> ApiResult<Json<Value>> {
    let documents = repository.children_between(id, from, to).await?;
    Ok(Json(documents_to_json(documents)))
}

pub(super) async fn children_within(
    repository: &Repository,
    id: &str,
    coords: &str,
) -> ApiResult<Json<Value>> {
    let documents = repository.children_within(id, coords).await?;
    Ok(Json(documents_to_json(documents)))
}
