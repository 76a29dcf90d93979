use aide::OperationOutput;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::models::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    ConfigError(String),
    Io(std::io::Error),
    InvalidPayload(String),
    Validation(ValidationErrors),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::InvalidPayload(msg) => write!(f, "Payload rejected by store: {}", msg),
            AppError::Validation(errors) => {
                write!(f, "Validation failed for {} field(s)", errors.data.len())
            }
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::DatabaseError(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::DatabaseError(ref e) => {
                tracing::error!("Database error: {:?}", e);
                let body = Json(json!({
                    "message": "Database error",
                    "detail": e.to_string(),
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::InvalidPayload(ref msg) => {
                tracing::error!("Payload rejected by store: {}", msg);
                let body = Json(json!({
                    "message": "Product could not be stored",
                    "detail": msg,
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::ConfigError(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                let body = Json(json!({ "message": "Server configuration error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::Io(ref e) => {
                tracing::error!("I/O error: {:?}", e);
                let body = Json(json!({ "message": "I/O error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

// Error statuses are declared per route, since which ones apply depends on
// the operation.
impl OperationOutput for AppError {
    type Inner = ();
}
