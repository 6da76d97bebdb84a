//! Generic repository over any [`Entity`].

use std::marker::PhantomData;

use crate::entity::Entity;
use crate::error::{QueryError, StoreError};
use crate::executor::QueryExecutor;
use crate::filter::{Filter, FilterSpec, OrderSpec};
use crate::store::Store;
use crate::value::Value;
use bursar_core::Paginated;

/// Common lookups shared by every entity.
///
/// ```ignore
/// let account = Repository::<Account>::get_by_attribute(&state.store, "email", email).await?;
/// ```
pub struct Repository<E>(PhantomData<fn() -> E>);

impl<E: Entity> Repository<E> {
    /// Single row whose `attribute` equals `value`, or `None`.
    ///
    /// The attribute is checked strictly: naming a column `E` lacks is an
    /// error here, since dropping the filter would match every row.
    pub async fn get_by_attribute<S: Store>(
        store: &S,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<Option<E>, QueryError> {
        QueryExecutor::<E>::strict(vec![Filter::eq(attribute, value)], Vec::new())
            .fetch_one(store)
            .await
    }

    pub async fn get_by_id<S: Store>(store: &S, id: i64) -> Result<Option<E>, QueryError> {
        Self::get_by_attribute(store, "id", id).await
    }

    pub async fn list<S: Store>(
        store: &S,
        filters: FilterSpec,
        orders: OrderSpec,
    ) -> Result<Vec<E>, QueryError> {
        QueryExecutor::<E>::new(filters, orders)
            .fetch_many(store)
            .await
    }

    pub async fn paginate<S: Store>(
        store: &S,
        filters: FilterSpec,
        orders: OrderSpec,
        page: i64,
        per_page: i64,
    ) -> Result<Paginated<E>, QueryError> {
        QueryExecutor::<E>::new(filters, orders)
            .fetch_paginated(store, page, per_page)
            .await
    }

    pub async fn create<S: Store>(store: &S, draft: &E::Draft) -> Result<E, StoreError> {
        store.insert::<E>(draft).await
    }
}
