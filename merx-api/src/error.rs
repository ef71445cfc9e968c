use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use merx_catalog::ValidationError;

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    NotFound,
    Internal {
        message: &'static str,
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Wrap an unexpected failure with the endpoint's 500 message.
    pub fn internal(message: &'static str, source: anyhow::Error) -> Self {
        Self::Internal { message, source }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "status": false,
                    "message": err.to_string(),
                })),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "status": false,
                    "message": "Product not found.",
                })),
            )
                .into_response(),
            ApiError::Internal { message, source } => {
                tracing::error!("{}: {:#}", message, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "status": false,
                        "message": message,
                        "error": source.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
