//! Auth Service
//!
//! Registration, credential checks, token issuance and account management.

use std::sync::Arc;

use chrono::Duration as ChronoDuration;
use kernel::id::AccountId;
use platform::clock::{Clock, SystemClock};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};

use crate::application::config::AuthConfig;
use crate::application::token::{AccessToken, TokenClaims, TokenCodec, TokenVerifier};
use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::{AccountRepository, CredentialRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Verified against when the username is unknown, so both failure paths
/// cost one digest computation.
const TIMING_DUMMY_PASSWORD: &str = "timing-equalization-dummy";

pub struct AuthService<R, H> {
    store: Arc<R>,
    hasher: H,
    config: Arc<AuthConfig>,
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
    dummy_digest: HashedPassword,
}

impl<R, H> AuthService<R, H>
where
    R: AccountRepository + CredentialRepository,
    H: PasswordHasher,
{
    /// Create a service reading time from the system clock
    pub fn new(store: Arc<R>, hasher: H, config: Arc<AuthConfig>) -> AuthResult<Self> {
        Self::with_clock(store, hasher, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<R>,
        hasher: H,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> AuthResult<Self> {
        let codec = TokenCodec::new(&config, clock.clone())?;
        let dummy = ClearTextPassword::new(TIMING_DUMMY_PASSWORD.to_string())?;
        let dummy_digest = hasher.hash(&dummy)?;

        Ok(Self {
            store,
            hasher,
            config,
            codec,
            clock,
            dummy_digest,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create a new account.
    ///
    /// Checks run in order: username format, password policy, uniqueness.
    /// The store's unique constraint is the final arbiter when two
    /// registrations race for the same name.
    pub async fn register(
        &self,
        username: &str,
        password: impl Into<String>,
    ) -> AuthResult<Account> {
        let username = Username::new(username)?;
        let password = ClearTextPassword::new(password.into())?;
        self.config.password_policy.check(&password)?;

        if self.store.exists_by_username(&username).await? {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = self.hasher.hash(&password)?;
        let account = self
            .store
            .create(NewAccount::new(username, password_hash, self.clock.now()))
            .await?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            "Account registered"
        );

        Ok(account)
    }

    /// Check a username/password pair.
    ///
    /// Unknown username and wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(
        &self,
        username: &str,
        password: impl Into<String>,
    ) -> AuthResult<Account> {
        let password = ClearTextPassword::new(password.into()).ok();

        let account = match Username::new(username) {
            Ok(username) => self.store.find_by_username(&username).await?,
            Err(_) => None,
        };
        let credential = match &account {
            Some(account) => self.store.find_by_account_id(account.id).await?,
            None => None,
        };

        let verified = match (&password, &credential) {
            (Some(password), Some(credential)) => {
                self.hasher.verify(password, &credential.password_hash)
            }
            (Some(password), None) => {
                let _ = self.hasher.verify(password, &self.dummy_digest);
                false
            }
            (None, _) => false,
        };

        match account {
            Some(account) if verified => Ok(account),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Sign a token for `username`.
    ///
    /// `ttl` defaults to the configured `default_token_ttl`.
    pub fn issue_token(
        &self,
        username: &str,
        ttl: Option<std::time::Duration>,
    ) -> AuthResult<AccessToken> {
        let username = Username::new(username)?;
        let ttl = ttl.unwrap_or(self.config.default_token_ttl);
        let ttl = ChronoDuration::from_std(ttl)
            .map_err(|_| AuthError::Internal("token lifetime out of range".to_string()))?;

        self.codec.encode(username.as_str(), ttl)
    }

    /// Validate a presented token and return its claims.
    ///
    /// Any failure (signature, algorithm, expiry, malformed, no subject)
    /// yields [`AuthError::InvalidToken`].
    pub fn verify_token(&self, token: &str) -> AuthResult<TokenClaims> {
        self.codec.decode(token)
    }

    /// Authenticate and issue an access token with the login lifetime
    pub async fn login(
        &self,
        username: &str,
        password: impl Into<String>,
    ) -> AuthResult<AccessToken> {
        let account = self.authenticate(username, password).await?;
        let token = self.issue_token(
            account.username.as_str(),
            Some(self.config.access_token_ttl),
        )?;

        tracing::info!(account_id = %account.id, "Access token issued");

        Ok(token)
    }

    pub async fn list_accounts(&self) -> AuthResult<Vec<Account>> {
        self.store.list().await
    }

    pub async fn get_account(&self, id: AccountId) -> AuthResult<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }

    /// Replace the password of an account owned by `actor`
    pub async fn change_password(
        &self,
        actor: &TokenClaims,
        id: AccountId,
        new_password: impl Into<String>,
    ) -> AuthResult<Account> {
        let account = self.owned_account(actor, id).await?;

        let password = ClearTextPassword::new(new_password.into())?;
        self.config.password_policy.check(&password)?;

        let mut credential = self
            .store
            .find_by_account_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        credential.replace_password(self.hasher.hash(&password)?, self.clock.now());

        if !self.store.update(&credential).await? {
            return Err(AuthError::AccountNotFound);
        }

        tracing::info!(account_id = %id, "Password changed");

        Ok(account)
    }

    /// Delete an account owned by `actor`
    pub async fn delete_account(&self, actor: &TokenClaims, id: AccountId) -> AuthResult<()> {
        self.owned_account(actor, id).await?;

        if !self.store.delete(id).await? {
            return Err(AuthError::AccountNotFound);
        }

        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }

    async fn owned_account(&self, actor: &TokenClaims, id: AccountId) -> AuthResult<Account> {
        let account = self.get_account(id).await?;
        if !account.is_owned_by(actor.subject()) {
            return Err(AuthError::NotAccountOwner);
        }
        Ok(account)
    }
}

impl<R, H> TokenVerifier for AuthService<R, H>
where
    R: AccountRepository + CredentialRepository + Send + Sync,
    H: PasswordHasher,
{
    fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        self.verify_token(token)
    }
}
