//! Entities the query layer knows how to load and store.

use std::collections::BTreeMap;
use std::fmt;

use sqlx::FromRow;
use sqlx::postgres::PgRow;

use crate::value::{ColumnKind, Value};

/// A row as plain column/value pairs, used by the in-memory store.
pub type Record = BTreeMap<&'static str, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// A table-backed record type.
///
/// `COLUMNS` is the complete set of attributes a filter or order may name.
/// Anything outside it never reaches generated SQL.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Clone + fmt::Debug + Send + Sync + Unpin + 'static
{
    /// Human-readable name used in errors, e.g. `Account`.
    const NAME: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static [Column];
    /// Columns with a case-insensitive unique index.
    const UNIQUE: &'static [&'static str];

    type Draft: Draft;

    fn column(name: &str) -> Option<&'static Column> {
        Self::COLUMNS.iter().find(|c| c.name == name)
    }

    fn from_record(record: &Record) -> Option<Self>;
}

/// The caller-supplied part of a new row. Storage assigns the rest.
pub trait Draft: Send + Sync {
    fn values(&self) -> Vec<(&'static str, Value)>;
}

pub fn get_int(record: &Record, column: &str) -> Option<i64> {
    match record.get(column)? {
        Value::Int(n) => Some(*n),
        _ => None,
    }
}

pub fn get_text(record: &Record, column: &str) -> Option<String> {
    match record.get(column)? {
        Value::Text(s) => Some(s.clone()),
        _ => None,
    }
}

pub fn get_timestamp(record: &Record, column: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    match record.get(column)? {
        Value::Timestamp(ts) => Some(*ts),
        _ => None,
    }
}
