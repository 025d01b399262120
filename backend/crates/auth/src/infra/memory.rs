//! In-Memory Repository Implementation
//!
//! Same contract as the Postgres store, used by tests and local runs
//! without a database. Ids are assigned from a counter starting at 1.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::AccountId;
use tokio::sync::RwLock;

use crate::domain::entity::{
    account::{Account, NewAccount},
    credential::Credential,
};
use crate::domain::repository::{AccountRepository, CredentialRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    next_id: i64,
    accounts: BTreeMap<AccountId, Account>,
    credentials: BTreeMap<AccountId, Credential>,
}

#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountStore {
    async fn create(&self, account: NewAccount) -> AuthResult<Account> {
        let mut state = self.state.write().await;

        // Checked under the write lock, so concurrent creates serialize here.
        if state
            .accounts
            .values()
            .any(|existing| existing.username == account.username)
        {
            return Err(AuthError::DuplicateUsername);
        }

        state.next_id += 1;
        let id = AccountId::new(state.next_id);

        let created = Account {
            id,
            username: account.username,
            created_at: account.created_at,
        };
        state.accounts.insert(id, created.clone());
        state.credentials.insert(
            id,
            Credential {
                account_id: id,
                password_hash: account.password_hash,
                updated_at: account.created_at,
            },
        );

        Ok(created)
    }

    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|account| &account.username == username)
            .cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .any(|account| &account.username == username))
    }

    async fn list(&self) -> AuthResult<Vec<Account>> {
        Ok(self.state.read().await.accounts.values().cloned().collect())
    }

    async fn delete(&self, id: AccountId) -> AuthResult<bool> {
        let mut state = self.state.write().await;
        state.credentials.remove(&id);
        Ok(state.accounts.remove(&id).is_some())
    }
}

impl CredentialRepository for InMemoryAccountStore {
    async fn find_by_account_id(&self, account_id: AccountId) -> AuthResult<Option<Credential>> {
        Ok(self.state.read().await.credentials.get(&account_id).cloned())
    }

    async fn update(&self, credential: &Credential) -> AuthResult<bool> {
        let mut state = self.state.write().await;
        match state.credentials.get_mut(&credential.account_id) {
            Some(stored) => {
                *stored = credential.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
