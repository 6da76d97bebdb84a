//! The storage seam between the query layer and a backend.

use std::future::Future;

use crate::entity::Entity;
use crate::error::StoreError;
#[cfg(any(test, feature = "test-utils"))]
use crate::memory::MemoryStore;
use crate::postgres::PgStore;
use crate::query::{Query, Window};

/// A backend able to run compiled queries and inserts.
///
/// Implementations are cheap to clone and shared across request tasks.
pub trait Store: Clone + Send + Sync + 'static {
    fn fetch<E: Entity>(
        &self,
        query: &Query<E>,
        window: Window,
    ) -> impl Future<Output = Result<Vec<E>, StoreError>> + Send;

    fn count<E: Entity>(
        &self,
        query: &Query<E>,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Inserts a row and returns it as stored, with every generated column filled.
    fn insert<E: Entity>(
        &self,
        draft: &E::Draft,
    ) -> impl Future<Output = Result<E, StoreError>> + Send;
}

/// The store held in application state.
#[derive(Clone, Debug)]
pub enum AnyStore {
    Postgres(PgStore),
    #[cfg(any(test, feature = "test-utils"))]
    Memory(MemoryStore),
}

impl Store for AnyStore {
    async fn fetch<E: Entity>(&self, query: &Query<E>, window: Window) -> Result<Vec<E>, StoreError> {
        match self {
            AnyStore::Postgres(store) => store.fetch(query, window).await,
            #[cfg(any(test, feature = "test-utils"))]
            AnyStore::Memory(store) => store.fetch(query, window).await,
        }
    }

    async fn count<E: Entity>(&self, query: &Query<E>) -> Result<i64, StoreError> {
        match self {
            AnyStore::Postgres(store) => store.count(query).await,
            #[cfg(any(test, feature = "test-utils"))]
            AnyStore::Memory(store) => store.count(query).await,
        }
    }

    async fn insert<E: Entity>(&self, draft: &E::Draft) -> Result<E, StoreError> {
        match self {
            AnyStore::Postgres(store) => store.insert::<E>(draft).await,
            #[cfg(any(test, feature = "test-utils"))]
            AnyStore::Memory(store) => store.insert::<E>(draft).await,
        }
    }
}

impl From<PgStore> for AnyStore {
    fn from(store: PgStore) -> Self {
        AnyStore::Postgres(store)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl From<MemoryStore> for AnyStore {
    fn from(store: MemoryStore) -> Self {
        AnyStore::Memory(store)
    }
}
