use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Domain error for all handlers. Each variant maps to one HTTP status and
/// one stable machine-readable code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    AuthRequired,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Role '{0}' does not exist")]
    UnknownRole(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    AlreadyLinked(String),

    #[error("Invalid or expired token")]
    InvalidResetToken,

    #[error("{0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(String),

    #[error("Internal server error")]
    Database(#[from] DbErr),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidResetToken => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::AuthRequired => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::UnknownRole(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) | AppError::AlreadyLinked(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::AuthRequired => "AUTH_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UnknownRole(_) => "UNKNOWN_ROLE",
            AppError::Duplicate(_) => "DUPLICATE",
            AppError::AlreadyLinked(_) => "ALREADY_LINKED",
            AppError::InvalidResetToken => "INVALID_OR_EXPIRED_TOKEN",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 5xx details go to the log, not to the client.
        match &self {
            AppError::Database(db_error) => error!("Database error: {}", db_error),
            AppError::Internal(detail) => error!("Internal error: {}", detail),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<crate::clients::assistant::AssistantError> for AppError {
    fn from(error: crate::clients::assistant::AssistantError) -> Self {
        AppError::Upstream(error.to_string())
    }
}

impl From<crate::clients::google::OAuthError> for AppError {
    fn from(error: crate::clients::google::OAuthError) -> Self {
        AppError::Upstream(error.to_string())
    }
}

/// Map a unique-constraint violation to `Duplicate` with the given message.
/// Any other database error passes through unchanged.
pub fn duplicate_on_unique(db_error: DbErr, message: impl Into<String>) -> AppError {
    if is_unique_violation(&db_error) {
        AppError::Duplicate(message.into())
    } else {
        AppError::Database(db_error)
    }
}

fn is_unique_violation(db_error: &DbErr) -> bool {
    let message = match db_error {
        DbErr::Exec(exec_error) => exec_error.to_string(),
        DbErr::Query(query_error) => query_error.to_string(),
        _ => return false,
    };
    let message = message.to_lowercase();
    message.contains("unique") || message.contains("constraint")
}
