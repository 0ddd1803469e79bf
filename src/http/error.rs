//! API error type and its JSON rendering.
//!
//! # Design Decisions
//! - One error enum for every handler; handlers return `Result<_, ApiError>`
//! - Rendered in exactly one place, always as `{"error": "..."}`
//! - Store errors convert with `?`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::routing::Resource;
use crate::store::StoreError;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A lookup by id found nothing.
    #[error("{} not found", .0.model_name())]
    NotFound(Resource),

    /// No route matches the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// The request body could not be read as the expected payload.
    #[error("{0}")]
    InvalidBody(String),

    /// The payload parsed but cannot be stored.
    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

/// Fallback for paths outside the route table.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_renders_error_shape() {
        let response = ApiError::NotFound(Resource::Reviews).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Review not found"}));
    }

    #[test]
    fn test_store_errors_are_unprocessable() {
        let err: ApiError = StoreError::MissingParent(7).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "DogHouse 7 does not exist");
    }
}
