//! Compiled queries.
//!
//! A [`Query`] is a filter spec, an order spec and any raw predicates,
//! checked against an entity's column table. Only column names from that
//! table are ever written into SQL; values are always bound parameters.

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::Arc;

use sqlx::{Postgres, QueryBuilder};
use tracing::debug;

use crate::entity::{Column, Entity, Record};
use crate::error::QueryError;
use crate::filter::{Filter, FilterOp, Order, SortDirection};
use crate::predicate::RawPredicate;
use crate::value::Value;

/// Row window applied to a fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl Window {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn limit(limit: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: 0,
        }
    }

    pub fn page(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset,
        }
    }
}

#[derive(Debug, Clone)]
struct Condition {
    column: &'static Column,
    op: FilterOp,
    value: Value,
}

#[derive(Debug, Clone, Copy)]
struct Sort {
    column: &'static str,
    direction: SortDirection,
}

#[derive(Debug, Clone)]
pub struct Query<E> {
    conditions: Vec<Condition>,
    sorts: Vec<Sort>,
    raw: Vec<Arc<dyn RawPredicate>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Query<E> {
    /// Checks `filters` and `orders` against `E::COLUMNS`.
    ///
    /// Unknown attributes are dropped, or rejected when `strict` is set.
    /// Filter values are coerced to the column's kind; a value that cannot be
    /// coerced is always an error.
    pub fn compile(
        filters: &[Filter],
        orders: &[Order],
        raw: Vec<Arc<dyn RawPredicate>>,
        strict: bool,
    ) -> Result<Self, QueryError> {
        let mut conditions = Vec::with_capacity(filters.len());
        for filter in filters {
            let Some(column) = resolve::<E>(&filter.attribute, strict)? else {
                continue;
            };
            let value = filter.value.clone().coerce(column.kind).ok_or_else(|| {
                QueryError::InvalidValue {
                    attribute: filter.attribute.clone(),
                    expected: column.kind,
                }
            })?;
            conditions.push(Condition {
                column,
                op: filter.op,
                value,
            });
        }

        let mut sorts = Vec::with_capacity(orders.len());
        for order in orders {
            if let Some(column) = resolve::<E>(&order.attribute, strict)? {
                sorts.push(Sort {
                    column: column.name,
                    direction: order.direction,
                });
            }
        }

        Ok(Self {
            conditions,
            sorts,
            raw,
            _entity: PhantomData,
        })
    }

    /// A query with no conditions and no ordering.
    pub fn everything() -> Self {
        Self {
            conditions: Vec::new(),
            sorts: Vec::new(),
            raw: Vec::new(),
            _entity: PhantomData,
        }
    }

    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut keyword = " WHERE ";
        for condition in &self.conditions {
            qb.push(keyword)
                .push(condition.column.name)
                .push(" ")
                .push(condition.op.as_sql())
                .push(" ");
            condition.value.bind_to(qb);
            keyword = " AND ";
        }
        for predicate in &self.raw {
            qb.push(keyword);
            predicate.push_sql(qb);
            keyword = " AND ";
        }
    }

    /// `SELECT * FROM <table> [WHERE ...] [ORDER BY ...] [LIMIT $n OFFSET $m]`
    pub fn select_sql(&self, window: Window) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", E::TABLE));
        self.push_where(&mut qb);

        if !self.sorts.is_empty() {
            qb.push(" ORDER BY ");
            for (i, sort) in self.sorts.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                qb.push(sort.column).push(" ").push(sort.direction.as_sql());
            }
        }

        if let Some(limit) = window.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if window.offset > 0 {
            qb.push(" OFFSET ").push_bind(window.offset);
        }
        qb
    }

    /// `SELECT COUNT(*)` over the same conditions, without order or window.
    pub fn count_sql(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        self.push_where(&mut qb);
        qb
    }

    /// Evaluates the conditions against an in-memory record.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|condition| {
            record
                .get(condition.column.name)
                .and_then(|stored| stored.compare(&condition.value))
                .is_some_and(|ordering| condition.op.holds(ordering))
        }) && self.raw.iter().all(|predicate| predicate.matches(record))
    }

    /// Multi-key comparison following the order spec; the first key is primary.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for sort in &self.sorts {
            let ordering = match (a.get(sort.column), b.get(sort.column)) {
                (Some(x), Some(y)) => x.compare(y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            };
            let ordering = match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn resolve<E: Entity>(attribute: &str, strict: bool) -> Result<Option<&'static Column>, QueryError> {
    match E::column(attribute) {
        Some(column) => Ok(Some(column)),
        None if strict => Err(QueryError::UnknownAttribute {
            entity: E::NAME,
            attribute: attribute.to_string(),
        }),
        None => {
            debug!(entity = E::NAME, attribute, "ignoring unknown attribute");
            Ok(None)
        }
    }
}
