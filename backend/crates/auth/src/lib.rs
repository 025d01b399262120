//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Accounts, credentials, repository traits
//! - `application/` - Auth service, token codec, configuration
//! - `infra/` - Postgres and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, bearer extractor, router
//!
//! ## Features
//! - Account registration with username + password
//! - Credential checks that do not reveal whether a username exists
//! - Signed, expiring bearer tokens (JWT, HMAC-SHA2)
//! - Account listing, password change and deletion
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; digests never leave the credential store
//! - Token expiry is checked against an injected clock with zero leeway
//! - Every verification failure collapses into a single `InvalidToken` error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::service::AuthService;
pub use application::token::{AccessToken, TokenClaims, TokenCodec, TokenVerifier};
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAccountStore;
pub use infra::postgres::PgAccountStore;
pub use presentation::extract::{Authenticated, TokenGuard};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
