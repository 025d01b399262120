//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::AccountId;

use crate::domain::entity::{
    account::{Account, NewAccount},
    credential::Credential,
};
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert the account and its credential atomically.
    ///
    /// Must fail with `AuthError::DuplicateUsername` when the username is
    /// already taken, including when a concurrent insert wins the race.
    async fn create(&self, account: NewAccount) -> AuthResult<Account>;

    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>>;

    /// Find account by exact username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>>;

    /// Check if username exists
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// All accounts ordered by id
    async fn list(&self) -> AuthResult<Vec<Account>>;

    /// Delete account and credential. Returns `false` if nothing was deleted.
    async fn delete(&self, id: AccountId) -> AuthResult<bool>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find credential by account ID
    async fn find_by_account_id(&self, account_id: AccountId) -> AuthResult<Option<Credential>>;

    /// Replace the stored digest. Returns `false` if the account is gone.
    async fn update(&self, credential: &Credential) -> AuthResult<bool>;
}
