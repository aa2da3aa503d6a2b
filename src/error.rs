use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors a product handler can answer with. Every variant renders as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Malformed product body")]
    MalformedBody,

    #[error("Product not found")]
    NotFound,

    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// `map_err` adapter that wraps a store failure under a generic message.
    pub fn store(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
        move |source| ApiError::Store { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Store { message, source } = &self {
            error!(error = ?source, "{message}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
