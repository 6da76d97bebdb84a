//! A small entity for exercising the query layer without the domain crate.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::entity::{Column, Draft, Entity, Record, get_int, get_text, get_timestamp};
use crate::value::{ColumnKind, Value};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub rank: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEntry {
    pub title: String,
    pub rank: i64,
}

impl NewEntry {
    pub fn new(title: &str, rank: i64) -> Self {
        Self {
            title: title.to_string(),
            rank,
        }
    }
}

impl Draft for NewEntry {
    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("title", Value::from(self.title.clone())),
            ("rank", Value::from(self.rank)),
        ]
    }
}

impl Entity for Entry {
    const NAME: &'static str = "Entry";
    const TABLE: &'static str = "entries";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", ColumnKind::Int),
        Column::new("title", ColumnKind::Text),
        Column::new("rank", ColumnKind::Int),
        Column::new("created_at", ColumnKind::Timestamp),
        Column::new("updated_at", ColumnKind::Timestamp),
    ];
    const UNIQUE: &'static [&'static str] = &["title"];

    type Draft = NewEntry;

    fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            id: get_int(record, "id")?,
            title: get_text(record, "title")?,
            rank: get_int(record, "rank")?,
            created_at: get_timestamp(record, "created_at")?,
            updated_at: get_timestamp(record, "updated_at")?,
        })
    }
}
