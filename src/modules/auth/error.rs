use axum::http::StatusCode;
use thiserror::Error;

use bursar_auth::TokenError;
use bursar_core::{AppError, errors::codes};
use bursar_db::{QueryError, StoreError};

use crate::modules::accounts::repository::CreateAccountError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    Conflict,

    /// Unknown email and wrong password both map here, indistinguishably.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("password check failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Create(CreateAccountError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl From<CreateAccountError> for AuthError {
    fn from(err: CreateAccountError) -> Self {
        match err {
            // Lost a race with a concurrent registration for the same email.
            CreateAccountError::Store(StoreError::UniqueViolation { .. }) => AuthError::Conflict,
            other => AuthError::Create(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Conflict => AppError::conflict(err),
            AuthError::InvalidCredentials => {
                AppError::new(StatusCode::BAD_REQUEST, codes::INVALID_USER_CREDS, err)
            }
            AuthError::Unauthenticated => AppError::unauthorized(err),
            AuthError::Query(query) => query.into(),
            AuthError::Token(_) | AuthError::Task(_) | AuthError::Create(_) => {
                AppError::internal(err)
            }
        }
    }
}
