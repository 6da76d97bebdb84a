//! In-process [`Store`] for tests.
//!
//! Rows live as [`Record`]s behind a mutex. Inserts assign sequential ids,
//! stamp every timestamp column the draft leaves empty, and enforce
//! `Entity::UNIQUE` case-insensitively the way the `lower(...)` unique
//! indexes in the migrations do.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::entity::{Draft, Entity, Record};
use crate::error::StoreError;
use crate::query::{Query, Window};
use crate::store::Store;
use crate::value::{ColumnKind, Value};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: Vec<Record>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<&'static str, Table>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<&'static str, Table>>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    fn fetch_now<E: Entity>(&self, query: &Query<E>, window: Window) -> Result<Vec<E>, StoreError> {
        let tables = self.lock()?;
        let Some(table) = tables.get(E::TABLE) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<&Record> = table.rows.iter().filter(|r| query.matches(r)).collect();
        rows.sort_by(|a, b| query.compare(a, b));

        let offset = usize::try_from(window.offset).unwrap_or(0);
        let limit = window
            .limit
            .map(|l| usize::try_from(l).unwrap_or(0))
            .unwrap_or(usize::MAX);

        rows.into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| E::from_record(record).ok_or(StoreError::Decode(E::NAME)))
            .collect()
    }

    fn count_now<E: Entity>(&self, query: &Query<E>) -> Result<i64, StoreError> {
        let tables = self.lock()?;
        let count = tables
            .get(E::TABLE)
            .map(|table| table.rows.iter().filter(|r| query.matches(r)).count())
            .unwrap_or(0);
        Ok(count as i64)
    }

    fn insert_now<E: Entity>(&self, draft: &E::Draft) -> Result<E, StoreError> {
        let mut tables = self.lock()?;
        let table = tables.entry(E::TABLE).or_default();

        let mut record: Record = draft.values().into_iter().collect();

        for column in E::UNIQUE {
            let Some(Value::Text(wanted)) = record.get(column) else {
                continue;
            };
            let wanted = wanted.to_lowercase();
            let taken = table.rows.iter().any(|row| {
                matches!(row.get(column), Some(Value::Text(existing)) if existing.to_lowercase() == wanted)
            });
            if taken {
                return Err(StoreError::UniqueViolation {
                    table: E::TABLE,
                    constraint: Some(format!("{}_{}_key", E::TABLE, column)),
                });
            }
        }

        let now = Utc::now();
        for column in E::COLUMNS {
            if column.kind == ColumnKind::Timestamp {
                record.entry(column.name).or_insert(Value::Timestamp(now));
            }
        }
        table.last_id += 1;
        record.insert("id", Value::Int(table.last_id));

        let entity = E::from_record(&record).ok_or(StoreError::Decode(E::NAME))?;
        table.rows.push(record);
        Ok(entity)
    }
}

impl Store for MemoryStore {
    async fn fetch<E: Entity>(&self, query: &Query<E>, window: Window) -> Result<Vec<E>, StoreError> {
        self.fetch_now(query, window)
    }

    async fn count<E: Entity>(&self, query: &Query<E>) -> Result<i64, StoreError> {
        self.count_now(query)
    }

    async fn insert<E: Entity>(&self, draft: &E::Draft) -> Result<E, StoreError> {
        self.insert_now::<E>(draft)
    }
}
