//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::value_object::username::UsernameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username already registered
    #[error("Username already registered")]
    DuplicateUsername,

    /// Unknown username or wrong password; the two are deliberately indistinguishable
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Bad signature, wrong algorithm, malformed, expired or subject-less token
    #[error("Token is invalid or expired")]
    InvalidToken,

    /// No bearer credentials on a protected route
    #[error("Not authenticated")]
    MissingToken,

    /// Token subject does not own the targeted account
    #[error("Not allowed to modify this account")]
    NotAccountOwner,

    #[error("User not found")]
    AccountNotFound,

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Password validation failed: {0}")]
    PasswordValidation(#[from] PasswordPolicyError),

    /// Body or path segment that does not deserialize
    #[error("{0}")]
    MalformedRequest(String),

    /// Misconfigured token secret or algorithm
    #[error("Auth configuration error: {0}")]
    Configuration(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateUsername => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken | AuthError::NotAccountOwner => StatusCode::FORBIDDEN,
            AuthError::AccountNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidUsername(_)
            | AuthError::PasswordValidation(_)
            | AuthError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::Configuration(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateUsername => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::MissingToken => ErrorKind::Unauthorized,
            AuthError::InvalidToken | AuthError::NotAccountOwner => ErrorKind::Forbidden,
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::InvalidUsername(_)
            | AuthError::PasswordValidation(_)
            | AuthError::MalformedRequest(_) => ErrorKind::BadRequest,
            AuthError::Configuration(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the response must carry a `WWW-Authenticate: Bearer` challenge
    fn needs_challenge(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials | AuthError::MissingToken)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Configuration(msg) => {
                tracing::error!(message = %msg, "Auth configuration error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = self.needs_challenge();
        let mut response = AppError::from(self).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, platform::bearer::challenge());
        }
        response
    }
}

/// Server-side details stay in the logs; clients get a generic message.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(e) => AppError::from(e),
            AuthError::Configuration(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AuthError {
    fn from(rejection: PathRejection) -> Self {
        AuthError::MalformedRequest(rejection.body_text())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::DuplicateUsername.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::AccountNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_matches_status() {
        let errors = [
            AuthError::DuplicateUsername,
            AuthError::InvalidCredentials,
            AuthError::InvalidToken,
            AuthError::MissingToken,
            AuthError::NotAccountOwner,
            AuthError::AccountNotFound,
            AuthError::InvalidUsername(UsernameError::Empty),
            AuthError::MalformedRequest("missing field `password`".into()),
            AuthError::Configuration("x".into()),
        ];
        for err in errors {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16(), "{err}");
        }
    }

    #[test]
    fn test_challenge_header_on_unauthorized() {
        let response = AuthError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn test_internal_details_hidden() {
        let app = AppError::from(AuthError::Internal("secret detail".into()));
        assert!(!app.message().contains("secret detail"));

        let app = AppError::from(AuthError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(app.kind(), ErrorKind::ServiceUnavailable);
    }
}
