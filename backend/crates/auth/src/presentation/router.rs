//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::service::AuthService;
use crate::domain::repository::{AccountRepository, CredentialRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router for any store and hasher implementation
pub fn auth_router<R, H>(service: Arc<AuthService<R, H>>) -> Router
where
    R: AccountRepository + CredentialRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    let state = AuthAppState { service };

    Router::new()
        .route("/register/", post(handlers::register::<R, H>))
        .route("/token/", post(handlers::issue_token::<R, H>))
        .route("/verify-token/", get(handlers::verify_bearer))
        .route("/verify-token/{token}", get(handlers::verify_path::<R, H>))
        .route("/users/", get(handlers::list_accounts::<R, H>))
        .route(
            "/users/{user_id}",
            get(handlers::get_account::<R, H>)
                .put(handlers::change_password::<R, H>)
                .delete(handlers::delete_account::<R, H>),
        )
        .with_state(state)
}
