//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case on the wire.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use serde::{Deserialize, Serialize};

use crate::application::token::AccessToken;
use crate::domain::entity::account::Account;

// ============================================================================
// Registration
// ============================================================================

/// Registration request (JSON body)
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Public view of an account; never includes password material
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username.into_inner(),
            created_at: account.created_at,
        }
    }
}

// ============================================================================
// Token
// ============================================================================

/// OAuth2 password-grant form (`application/x-www-form-urlencoded`).
///
/// `grant_type`, `scope` and client fields are accepted and ignored.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.into_string(),
            token_type: "bearer",
        }
    }
}

// ============================================================================
// Account management
// ============================================================================

/// Password change request
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

// ============================================================================
// Generic
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}
