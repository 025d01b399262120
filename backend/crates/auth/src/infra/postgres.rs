//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{
    account::{Account, NewAccount},
    credential::Credential,
};
use crate::domain::repository::{AccountRepository, CredentialRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed account and credential store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations on insert mean the username is taken
fn map_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AuthError::DuplicateUsername;
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAccountStore {
    async fn create(&self, account: NewAccount) -> AuthResult<Account> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO accounts (username, created_at)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO credentials (account_id, password_hash, updated_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(account.password_hash.as_phc_string())
        .bind(account.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Account {
            id: AccountId::new(id),
            username: account.username,
            created_at: account.created_at,
        })
    }

    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)")
                .bind(username.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self) -> AuthResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, created_at
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    async fn delete(&self, id: AccountId) -> AuthResult<bool> {
        // credentials go with it via ON DELETE CASCADE
        let deleted = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAccountStore {
    async fn find_by_account_id(&self, account_id: AccountId) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT account_id, password_hash, updated_at
            FROM credentials
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_credential).transpose()
    }

    async fn update(&self, credential: &Credential) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE credentials
            SET password_hash = $2, updated_at = $3
            WHERE account_id = $1
            "#,
        )
        .bind(credential.account_id.get())
        .bind(credential.password_hash.as_phc_string())
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let username = Username::new(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid username in store: {}", e)))?;

        Ok(Account {
            id: AccountId::new(self.id),
            username,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    account_id: i64,
    password_hash: String,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<Credential> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)?;

        Ok(Credential {
            account_id: AccountId::new(self.account_id),
            password_hash,
            updated_at: self.updated_at,
        })
    }
}
