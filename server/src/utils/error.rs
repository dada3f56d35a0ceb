use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;
use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed with {} error(s)", .0.len())]
    ValidationError(Vec<FieldError>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(errors) => {
                warn!(count = errors.len(), errors = ?errors, "Rejected event submission");
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, "Resource not found");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        match self {
            // Clients receive the bare list of field errors
            AppError::ValidationError(errors) => (status, Json(errors)).into_response(),
            AppError::NotFound(_) => status.into_response(),
            AppError::DatabaseError(_) => {
                error_response(code, "A database error occurred", None, status)
            }
            AppError::InternalServerError(msg) => error_response(code, msg, None, status),
        }
    }
}
