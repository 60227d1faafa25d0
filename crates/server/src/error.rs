//! API error type with HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use geostack::{GeostackError, TileIndexError};
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Parameter validation or document store failure
    #[error("{0}")]
    Query(#[from] GeostackError),

    #[error("{0}")]
    Tiles(#[from] TileIndexError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Query(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Tiles(TileIndexError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Tiles(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(GeostackError::InvalidIdentifier("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(GeostackError::AmountTooLarge {
                    requested: 7,
                    max: 5,
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(GeostackError::Store("connection reset".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(TileIndexError::NotConfigured),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }
}
