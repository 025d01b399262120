//! Account Entity
//!
//! Public face of a registered user. Carries no password material; the
//! digest lives in [`Credential`](super::credential::Credential) and never
//! leaves the auth crate.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::value_object::username::Username;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether the given token subject names this account
    pub fn is_owned_by(&self, subject: &str) -> bool {
        self.username.as_str() == subject
    }
}

/// An account about to be inserted; the store assigns the id.
#[derive(Debug)]
pub struct NewAccount {
    pub username: Username,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn new(username: Username, password_hash: HashedPassword, now: DateTime<Utc>) -> Self {
        Self {
            username,
            password_hash,
            created_at: now,
        }
    }
}
