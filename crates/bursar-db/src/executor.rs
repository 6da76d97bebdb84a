//! Query execution over a [`Store`].
//!
//! A [`QueryExecutor`] is bound to one entity type, one filter spec and one
//! order spec at construction, and can then be run any number of times.
//!
//! # Example
//!
//! ```ignore
//! use bursar_db::{Filter, FilterOp, Order, QueryExecutor};
//!
//! let page = QueryExecutor::<Account>::new(
//!     vec![Filter::new("id", FilterOp::Gt, 100)],
//!     vec![Order::desc("created_at")],
//! )
//! .fetch_paginated(&state.store, 2, 25)
//! .await?;
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::error;

use bursar_core::pagination::{
    Paginated, effective_page, effective_per_page, page_offset, total_pages,
};

use crate::entity::Entity;
use crate::error::QueryError;
use crate::filter::{FilterSpec, OrderSpec};
use crate::predicate::RawPredicate;
use crate::query::{Query, Window};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct QueryExecutor<E> {
    filters: FilterSpec,
    orders: OrderSpec,
    raw: Vec<Arc<dyn RawPredicate>>,
    strict: bool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> QueryExecutor<E> {
    /// Attributes `E` does not have are ignored.
    pub fn new(filters: FilterSpec, orders: OrderSpec) -> Self {
        Self {
            filters,
            orders,
            raw: Vec::new(),
            strict: false,
            _entity: PhantomData,
        }
    }

    /// Attributes `E` does not have fail with [`QueryError::UnknownAttribute`].
    pub fn strict(filters: FilterSpec, orders: OrderSpec) -> Self {
        Self {
            strict: true,
            ..Self::new(filters, orders)
        }
    }

    /// ANDs a raw predicate after the declarative filters.
    pub fn with_raw(mut self, predicate: impl RawPredicate + 'static) -> Self {
        self.raw.push(Arc::new(predicate));
        self
    }

    fn query(&self) -> Result<Query<E>, QueryError> {
        Query::compile(&self.filters, &self.orders, self.raw.clone(), self.strict)
    }

    /// Returns the single matching row, or `None`.
    ///
    /// More than one match is an integrity failure, reported as
    /// [`QueryError::MultipleRows`] rather than picking one arbitrarily.
    pub async fn fetch_one<S: Store>(&self, store: &S) -> Result<Option<E>, QueryError> {
        let query = self.query()?;
        let mut rows = store.fetch(&query, Window::limit(2)).await?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            _ => {
                error!(entity = E::NAME, filters = ?self.filters, "expected one row, found several");
                Err(QueryError::MultipleRows { entity: E::NAME })
            }
        }
    }

    /// Like [`fetch_one`](Self::fetch_one) but absence is [`QueryError::NotFound`].
    pub async fn fetch_one_or_fail<S: Store>(&self, store: &S) -> Result<E, QueryError> {
        self.fetch_one(store)
            .await?
            .ok_or_else(|| QueryError::NotFound {
                entity: E::NAME,
                filters: self.filters.clone(),
            })
    }

    /// Every matching row, in order-spec order. No implicit limit.
    pub async fn fetch_many<S: Store>(&self, store: &S) -> Result<Vec<E>, QueryError> {
        let query = self.query()?;
        Ok(store.fetch(&query, Window::all()).await?)
    }

    /// One page of matching rows plus the page count for the whole set.
    ///
    /// `per_page <= 0` means 10; `page < 1` means 1. The page count comes from
    /// a separate `COUNT(*)` over the same conditions. A page whose offset does
    /// not fit in an `i64` is empty.
    pub async fn fetch_paginated<S: Store>(
        &self,
        store: &S,
        page: i64,
        per_page: i64,
    ) -> Result<Paginated<E>, QueryError> {
        let page = effective_page(page);
        let per_page = effective_per_page(per_page);
        let query = self.query()?;

        let data = match page_offset(page, per_page) {
            Some(offset) => store.fetch(&query, Window::page(per_page, offset)).await?,
            None => Vec::new(),
        };
        let total = store.count(&query).await?;

        Ok(Paginated {
            page,
            total_pages: total_pages(total, per_page),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Filter, FilterOp, Order};
    use crate::memory::MemoryStore;
    use crate::predicate::LowerEq;
    use crate::testing::{Entry, NewEntry};

    async fn store_with(count: i64) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 1..=count {
            store
                .insert::<Entry>(&NewEntry::new(&format!("entry-{i:02}"), i % 3))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_paginate_twenty_five_rows() {
        let store = store_with(25).await;
        let executor = QueryExecutor::<Entry>::new(vec![], vec![Order::asc("id")]);

        let first = executor.fetch_paginated(&store, 1, 10).await.unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.data.len(), 10);
        assert_eq!(first.data[0].id, 1);

        let third = executor.fetch_paginated(&store, 3, 10).await.unwrap();
        assert_eq!(third.total_pages, 3);
        assert_eq!(third.data.len(), 5);
        assert_eq!(third.data[0].id, 21);

        let beyond = executor.fetch_paginated(&store, 4, 10).await.unwrap();
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.total_pages, 3);
    }

    #[tokio::test]
    async fn test_paginate_defaults() {
        let store = store_with(25).await;
        let executor = QueryExecutor::<Entry>::new(vec![], vec![Order::asc("id")]);

        let page = executor.fetch_paginated(&store, 0, 0).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total_pages, 3);

        let page = executor.fetch_paginated(&store, 1, -4).await.unwrap();
        assert_eq!(page.data.len(), 10);
    }

    #[tokio::test]
    async fn test_paginate_counts_filtered_rows_only() {
        let store = store_with(25).await;
        let executor = QueryExecutor::<Entry>::new(
            vec![Filter::eq("rank", 0i64)],
            vec![Order::asc("id")],
        );

        let page = executor.fetch_paginated(&store, 1, 5).await.unwrap();
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total_pages, 2);
        assert!(page.data.iter().all(|e| e.rank == 0));
    }

    #[tokio::test]
    async fn test_fetch_one_found_and_absent() {
        let store = store_with(3).await;

        let found = QueryExecutor::<Entry>::new(vec![Filter::eq("id", 2i64)], vec![])
            .fetch_one(&store)
            .await
            .unwrap();
        assert_eq!(found.unwrap().title, "entry-02");

        let absent = QueryExecutor::<Entry>::new(vec![Filter::eq("id", 99i64)], vec![])
            .fetch_one(&store)
            .await
            .unwrap();
        assert!(absent.is_none());
    }

    #[tokio::test]
    async fn test_fetch_one_multiple_rows_is_integrity_error() {
        let store = store_with(6).await;
        let err = QueryExecutor::<Entry>::new(vec![Filter::eq("rank", 1i64)], vec![])
            .fetch_one(&store)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::MultipleRows { entity: "Entry" }));
    }

    #[tokio::test]
    async fn test_fetch_one_or_fail_carries_filters() {
        let store = store_with(1).await;
        let filters = vec![Filter::eq("title", "missing")];
        let err = QueryExecutor::<Entry>::new(filters.clone(), vec![])
            .fetch_one_or_fail(&store)
            .await
            .unwrap_err();

        match err {
            QueryError::NotFound {
                entity,
                filters: carried,
            } => {
                assert_eq!(entity, "Entry");
                assert_eq!(carried, filters);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_one_or_fail_single_match() {
        let store = store_with(3).await;
        let entry = QueryExecutor::<Entry>::new(vec![Filter::eq("title", "entry-02")], vec![])
            .fetch_one_or_fail(&store)
            .await
            .unwrap();
        assert_eq!(entry.id, 2);
        assert_eq!(entry.rank, 2);
    }

    #[tokio::test]
    async fn test_fetch_one_or_fail_multiple_rows() {
        let store = store_with(6).await;
        let err = QueryExecutor::<Entry>::new(vec![Filter::eq("rank", 0i64)], vec![])
            .fetch_one_or_fail(&store)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::MultipleRows { entity: "Entry" }));
    }

    #[tokio::test]
    async fn test_paginate_huge_page_is_empty() {
        let store = store_with(25).await;
        let executor = QueryExecutor::<Entry>::new(vec![], vec![]);

        let page = executor.fetch_paginated(&store, i64::MAX, 100).await.unwrap();
        assert_eq!(page.page, i64::MAX);
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_paginate_huge_per_page() {
        let store = store_with(2).await;
        let executor = QueryExecutor::<Entry>::new(vec![], vec![Order::asc("id")]);

        let page = executor.fetch_paginated(&store, 1, i64::MAX).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total_pages, 1);

        let page = executor.fetch_paginated(&store, 2, i64::MAX).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_unknown_attribute_is_ignored() {
        let store = store_with(4).await;
        let everything = QueryExecutor::<Entry>::new(vec![], vec![])
            .fetch_many(&store)
            .await
            .unwrap();
        let with_unknown =
            QueryExecutor::<Entry>::new(vec![Filter::eq("nonexistent", 1i64)], vec![])
                .fetch_many(&store)
                .await
                .unwrap();
        assert_eq!(everything, with_unknown);
    }

    #[tokio::test]
    async fn test_strict_rejects_unknown_attribute() {
        let store = store_with(1).await;
        let err = QueryExecutor::<Entry>::strict(vec![Filter::eq("nonexistent", 1i64)], vec![])
            .fetch_many(&store)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::UnknownAttribute { .. }));
    }

    #[tokio::test]
    async fn test_fetch_many_orders_by_multiple_keys() {
        let store = store_with(6).await;
        let rows = QueryExecutor::<Entry>::new(
            vec![Filter::new("id", FilterOp::Lte, 6i64)],
            vec![Order::desc("rank"), Order::asc("id")],
        )
        .fetch_many(&store)
        .await
        .unwrap();

        let ids: Vec<i64> = rows.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 5, 1, 4, 3, 6]);
    }

    #[tokio::test]
    async fn test_with_raw_predicate() {
        let store = store_with(3).await;
        let found = QueryExecutor::<Entry>::new(vec![], vec![])
            .with_raw(LowerEq::new("title", "ENTRY-03"))
            .fetch_one(&store)
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, 3);
    }
}
