//! Account persistence.

use thiserror::Error;
use tracing::instrument;

use bursar_core::{PasswordError, hash_password};
use bursar_db::{LowerEq, QueryError, QueryExecutor, Repository, Store, StoreError, Value};
use bursar_models::{Account, NewAccount, RegisterRequest};

#[derive(Debug, Error)]
pub enum CreateAccountError {
    #[error(transparent)]
    Hash(#[from] PasswordError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct AccountRepository;

impl AccountRepository {
    pub async fn get_by_attribute<S: Store>(
        store: &S,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Account>, QueryError> {
        Repository::<Account>::get_by_attribute(store, attribute, value).await
    }

    /// Case-insensitive email lookup.
    pub async fn get_by_email<S: Store>(
        store: &S,
        email: &str,
    ) -> Result<Option<Account>, QueryError> {
        QueryExecutor::<Account>::new(Vec::new(), Vec::new())
            .with_raw(LowerEq::new("email", email))
            .fetch_one(store)
            .await
    }

    /// Hashes the password, then inserts the account.
    ///
    /// Nothing is written if hashing fails. The stored row is returned with its
    /// generated id and timestamps.
    #[instrument(skip_all)]
    pub async fn create_with_hash<S: Store>(
        store: &S,
        dto: RegisterRequest,
    ) -> Result<Account, CreateAccountError> {
        let RegisterRequest {
            full_name,
            email,
            password,
        } = dto;

        let password_digest =
            tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let draft = NewAccount {
            full_name,
            email,
            password_digest,
        };
        Ok(Repository::<Account>::create(store, &draft).await?)
    }
}
