use thiserror::Error;
use tracing::debug;

use bursar_core::AppError;

use crate::filter::FilterSpec;
use crate::value::ColumnKind;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {table}")]
    UniqueViolation {
        table: &'static str,
        constraint: Option<String>,
    },

    #[error("stored row could not be decoded as {0}")]
    Decode(&'static str),

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }
}

/// Turns a driver error into a [`StoreError`], recognizing unique violations.
pub(crate) fn classify(table: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation {
                table,
                constraint: db_err.constraint().map(str::to_string),
            };
        }
    }
    StoreError::Database(err)
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// Display carries only the entity name; the filters are for logs.
    #[error("{entity} not found")]
    NotFound {
        entity: &'static str,
        filters: FilterSpec,
    },

    #[error("expected at most one {entity}, found several")]
    MultipleRows { entity: &'static str },

    #[error("{entity} has no attribute `{attribute}`")]
    UnknownAttribute {
        entity: &'static str,
        attribute: String,
    },

    #[error("`{attribute}` expects {expected}")]
    InvalidValue {
        attribute: String,
        expected: ColumnKind,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::internal(err)
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound {
                entity,
                ref filters,
            } => {
                debug!(entity, ?filters, "lookup matched nothing");
                AppError::not_found(err)
            }
            QueryError::UnknownAttribute { .. } | QueryError::InvalidValue { .. } => {
                AppError::bad_request(err)
            }
            QueryError::MultipleRows { .. } | QueryError::Store(_) => AppError::internal(err),
        }
    }
}
