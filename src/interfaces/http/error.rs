//! Error types for the HTTP surface.

use crate::error::FraudOpsError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal server error")]
    Internal,
}

impl From<FraudOpsError> for ApiError {
    fn from(err: FraudOpsError) -> Self {
        match err {
            FraudOpsError::TransactionNotFound(id) => ApiError::NotFound { resource: id },
            FraudOpsError::Validation(message) => ApiError::BadRequest { message },
            FraudOpsError::InvalidTransition { .. } | FraudOpsError::EscrowMissing(_) => {
                ApiError::Conflict {
                    message: err.to_string(),
                }
            }
            _ => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({ "ok": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}
