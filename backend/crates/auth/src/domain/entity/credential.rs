//! Credential Entity
//!
//! Password digest for one account, stored 1:1 next to it.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

#[derive(Debug, Clone)]
pub struct Credential {
    pub account_id: AccountId,
    pub password_hash: HashedPassword,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn replace_password(&mut self, password_hash: HashedPassword, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }
}
