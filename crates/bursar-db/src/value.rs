//! Scalar values carried by filters and in-memory records.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

/// The storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Text,
    Timestamp,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Int => "an integer",
            ColumnKind::Text => "text",
            ColumnKind::Timestamp => "an RFC 3339 timestamp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Int(_) => ColumnKind::Int,
            Value::Text(_) => ColumnKind::Text,
            Value::Timestamp(_) => ColumnKind::Timestamp,
        }
    }

    /// Converts the value to the representation a column of `kind` stores.
    ///
    /// Text is parsed when the column is numeric or temporal, so values taken
    /// straight from a query string can be compared against typed columns.
    pub fn coerce(self, kind: ColumnKind) -> Option<Value> {
        match (self, kind) {
            (v @ Value::Int(_), ColumnKind::Int) => Some(v),
            (v @ Value::Text(_), ColumnKind::Text) => Some(v),
            (v @ Value::Timestamp(_), ColumnKind::Timestamp) => Some(v),
            (Value::Text(s), ColumnKind::Int) => s.trim().parse().ok().map(Value::Int),
            (Value::Text(s), ColumnKind::Timestamp) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| Value::Timestamp(dt.with_timezone(&Utc))),
            (Value::Int(n), ColumnKind::Text) => Some(Value::Text(n.to_string())),
            _ => None,
        }
    }

    /// Orders two values of the same kind; mixed kinds are incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Appends the value to `qb` as a bound parameter.
    pub fn bind_to(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Value::Int(n) => qb.push_bind(*n),
            Value::Text(s) => qb.push_bind(s.clone()),
            Value::Timestamp(ts) => qb.push_bind(*ts),
        };
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_coerce_text_to_int() {
        assert_eq!(
            Value::from("42").coerce(ColumnKind::Int),
            Some(Value::Int(42))
        );
        assert_eq!(Value::from("forty").coerce(ColumnKind::Int), None);
    }

    #[test]
    fn test_coerce_text_to_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            Value::from("2024-03-01T13:00:00+01:00").coerce(ColumnKind::Timestamp),
            Some(Value::Timestamp(expected))
        );
        assert_eq!(Value::from("yesterday").coerce(ColumnKind::Timestamp), None);
    }

    #[test]
    fn test_coerce_timestamp_to_int_fails() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(Value::from(ts).coerce(ColumnKind::Int), None);
    }

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(
            Value::from(1i64).compare(&Value::from(2i64)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("b").compare(&Value::from("a")),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_compare_mixed_kind() {
        assert_eq!(Value::from(1i64).compare(&Value::from("1")), None);
    }

    #[test]
    fn test_untagged_serde() {
        assert_eq!(serde_json::to_string(&Value::from(7i64)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Value::from("x")).unwrap(), "\"x\"");
        let parsed: Value = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, Value::Int(12));
    }

    #[test]
    fn test_bind_to_uses_placeholders() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        Value::from(1i64).bind_to(&mut qb);
        qb.push(", ");
        Value::from("a").bind_to(&mut qb);
        assert_eq!(qb.sql(), "SELECT $1, $2");
    }
}
