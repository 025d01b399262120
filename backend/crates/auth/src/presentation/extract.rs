//! Bearer Token Extractor
//!
//! `Authenticated` guards a handler: it pulls the bearer token from the
//! `Authorization` header and verifies it before the handler runs.
//!
//! Any router can use it as long as its state yields a [`TokenGuard`]
//! through `FromRef`:
//!
//! ```ignore
//! impl FromRef<MyState> for TokenGuard {
//!     fn from_ref(state: &MyState) -> Self {
//!         state.tokens.clone()
//!     }
//! }
//!
//! async fn create_post(Authenticated(claims): Authenticated) { /* ... */ }
//! ```

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use platform::bearer::extract_bearer;

use crate::application::token::{TokenClaims, TokenVerifier};
use crate::error::AuthError;

/// Shared handle to whatever verifies tokens for a router
#[derive(Clone)]
pub struct TokenGuard(Arc<dyn TokenVerifier>);

impl TokenGuard {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self(verifier)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.0.verify(token)
    }
}

/// Claims of the verified bearer token on the current request.
///
/// Rejects with `MissingToken` (401 + challenge) when no bearer credentials
/// are present and with `InvalidToken` (403) when they do not verify.
#[derive(Debug, Clone)]
pub struct Authenticated(pub TokenClaims);

impl Authenticated {
    pub fn username(&self) -> &str {
        self.0.subject()
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    TokenGuard: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers).ok_or(AuthError::MissingToken)?;
        let guard = TokenGuard::from_ref(state);
        guard.verify(&token).map(Authenticated)
    }
}
