//! Social Error Types
//!
//! This module provides social-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Social-specific result type alias
pub type SocialResult<T> = Result<T, SocialError>;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("Post not found")]
    PostNotFound,

    #[error("Story not found")]
    StoryNotFound,

    /// Field-level validation failure
    #[error("{0}")]
    Validation(String),

    /// Bearer subject is not the record's author
    #[error("Not allowed to modify content of another user")]
    NotOwner,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SocialError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SocialError::PostNotFound | SocialError::StoryNotFound => StatusCode::NOT_FOUND,
            SocialError::Validation(_) => StatusCode::BAD_REQUEST,
            SocialError::NotOwner => StatusCode::FORBIDDEN,
            SocialError::Database(_) | SocialError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SocialError::PostNotFound | SocialError::StoryNotFound => ErrorKind::NotFound,
            SocialError::Validation(_) => ErrorKind::BadRequest,
            SocialError::NotOwner => ErrorKind::Forbidden,
            SocialError::Database(_) | SocialError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SocialError::Database(e) => {
                tracing::error!(error = %e, "Social database error");
            }
            SocialError::Internal(msg) => {
                tracing::error!(message = %msg, "Social internal error");
            }
            SocialError::NotOwner => {
                tracing::warn!("Write attempt on content owned by another user");
            }
            _ => {
                tracing::debug!(error = %self, "Social error");
            }
        }
    }
}

impl From<SocialError> for AppError {
    fn from(err: SocialError) -> Self {
        match err {
            SocialError::Database(e) => AppError::from(e),
            SocialError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

/// Account lookups only fail on storage errors.
impl From<AuthError> for SocialError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(e) => SocialError::Database(e),
            other => SocialError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for SocialError {
    fn from(rejection: JsonRejection) -> Self {
        SocialError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for SocialError {
    fn from(rejection: PathRejection) -> Self {
        SocialError::Validation(rejection.body_text())
    }
}

impl IntoResponse for SocialError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
