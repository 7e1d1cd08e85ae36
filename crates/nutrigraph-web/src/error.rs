//! Mapping of engine errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nutrigraph_core::error::NutriError;
use serde_json::json;

/// An engine error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub NutriError);

impl From<NutriError> for ApiError {
    fn from(e: NutriError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            NutriError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "status": "loading", "error": NutriError::NotReady.to_string() }),
            ),
            e @ NutriError::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "status": "unavailable", "error": e.to_string() }),
            ),
            e @ NutriError::NodeNotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "error": e.to_string() }))
            }
            e @ NutriError::InvalidConfig { .. } => {
                (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() }))
            }
            e => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
