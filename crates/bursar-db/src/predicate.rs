//! Raw predicates appended after the declarative filters.

use std::fmt;

use sqlx::{Postgres, QueryBuilder};

use crate::entity::Record;
use crate::value::Value;

/// A condition the declarative operators cannot express.
///
/// Implementations render their own SQL and must bind every value through
/// `qb`. `matches` evaluates the same condition against an in-memory record.
pub trait RawPredicate: Send + Sync + fmt::Debug {
    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>);

    fn matches(&self, record: &Record) -> bool;
}

/// Case-insensitive text equality: `lower(column) = lower($n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerEq {
    pub column: &'static str,
    pub value: String,
}

impl LowerEq {
    pub fn new(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

impl RawPredicate for LowerEq {
    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("lower(")
            .push(self.column)
            .push(") = lower(")
            .push_bind(self.value.clone())
            .push(")");
    }

    fn matches(&self, record: &Record) -> bool {
        match record.get(self.column) {
            Some(Value::Text(stored)) => stored.to_lowercase() == self.value.to_lowercase(),
            _ => false,
        }
    }
}
