//! HTTP Handlers

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use kernel::id::AccountId;
use platform::password::PasswordHasher;

use crate::application::service::AuthService;
use crate::domain::repository::{AccountRepository, CredentialRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountResponse, ChangePasswordRequest, DetailResponse, LoginForm, MessageResponse,
    RegisterRequest, TokenResponse,
};
use crate::presentation::extract::{Authenticated, TokenGuard};

/// Shared state for auth handlers
pub struct AuthAppState<R, H> {
    pub service: Arc<AuthService<R, H>>,
}

impl<R, H> Clone for AuthAppState<R, H> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<R, H> FromRef<AuthAppState<R, H>> for TokenGuard
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    fn from_ref(state: &AuthAppState<R, H>) -> Self {
        TokenGuard::new(state.service.clone())
    }
}

// ============================================================================
// Registration
// ============================================================================

/// POST /register/
pub async fn register<R, H>(
    State(state): State<AuthAppState<R, H>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<AccountResponse>)>
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    let Json(req) = body?;
    let account = state.service.register(&req.username, req.password).await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

// ============================================================================
// Tokens
// ============================================================================

/// POST /token/
///
/// An incomplete form is answered like a failed login.
pub async fn issue_token<R, H>(
    State(state): State<AuthAppState<R, H>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    let Form(form) = form.map_err(|_| AuthError::InvalidCredentials)?;
    let token = state.service.login(&form.username, form.password).await?;

    Ok(Json(token.into()))
}

/// GET /verify-token/ (token in the `Authorization` header)
pub async fn verify_bearer(Authenticated(_claims): Authenticated) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Token is valid",
    })
}

/// GET /verify-token/{token}
pub async fn verify_path<R, H>(
    State(state): State<AuthAppState<R, H>>,
    Path(token): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    state.service.verify_token(&token)?;

    Ok(Json(MessageResponse {
        message: "Token is valid",
    }))
}

// ============================================================================
// Accounts
// ============================================================================

/// GET /users/
pub async fn list_accounts<R, H>(
    State(state): State<AuthAppState<R, H>>,
) -> AuthResult<Json<Vec<AccountResponse>>>
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    let accounts = state.service.list_accounts().await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// GET /users/{user_id}
pub async fn get_account<R, H>(
    State(state): State<AuthAppState<R, H>>,
    path: Result<Path<AccountId>, PathRejection>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    let Path(id) = path?;
    let account = state.service.get_account(id).await?;

    Ok(Json(account.into()))
}

/// PUT /users/{user_id}
pub async fn change_password<R, H>(
    State(state): State<AuthAppState<R, H>>,
    Authenticated(claims): Authenticated,
    path: Result<Path<AccountId>, PathRejection>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    let Path(id) = path?;
    let Json(req) = body?;
    let account = state
        .service
        .change_password(&claims, id, req.password)
        .await?;

    Ok(Json(account.into()))
}

/// DELETE /users/{user_id}
pub async fn delete_account<R, H>(
    State(state): State<AuthAppState<R, H>>,
    Authenticated(claims): Authenticated,
    path: Result<Path<AccountId>, PathRejection>,
) -> AuthResult<Json<DetailResponse>>
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    let Path(id) = path?;
    state.service.delete_account(&claims, id).await?;

    Ok(Json(DetailResponse {
        detail: "User deleted successfully",
    }))
}
