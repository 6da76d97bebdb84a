//! PostgreSQL-backed [`Store`].

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use crate::entity::{Draft, Entity};
use crate::error::{StoreError, classify};
use crate::query::{Query, Window};
use crate::store::Store;

/// Runs queries on a shared connection pool.
///
/// Each call checks a connection out of the pool for the duration of one
/// statement; sqlx returns it on every exit path, including cancellation.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `INSERT INTO <table> (c1, c2, ...) VALUES ($1, $2, ...) RETURNING *`
pub(crate) fn insert_sql<E: Entity>(draft: &E::Draft) -> QueryBuilder<'static, Postgres> {
    let values = draft.values();

    let mut qb = QueryBuilder::new(format!("INSERT INTO {} (", E::TABLE));
    for (i, (column, _)) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(*column);
    }
    qb.push(") VALUES (");
    for (i, (_, value)) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        value.bind_to(&mut qb);
    }
    qb.push(") RETURNING *");
    qb
}

impl Store for PgStore {
    #[instrument(skip_all, fields(table = E::TABLE))]
    async fn fetch<E: Entity>(&self, query: &Query<E>, window: Window) -> Result<Vec<E>, StoreError> {
        let mut qb = query.select_sql(window);
        debug!(sql = qb.sql(), "fetch");
        qb.build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify(E::TABLE, e))
    }

    #[instrument(skip_all, fields(table = E::TABLE))]
    async fn count<E: Entity>(&self, query: &Query<E>) -> Result<i64, StoreError> {
        let mut qb = query.count_sql();
        debug!(sql = qb.sql(), "count");
        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(E::TABLE, e))
    }

    #[instrument(skip_all, fields(table = E::TABLE))]
    async fn insert<E: Entity>(&self, draft: &E::Draft) -> Result<E, StoreError> {
        let mut qb = insert_sql::<E>(draft);
        qb.build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(E::TABLE, e))
    }
}
