//! Order storage collaborator.

use std::sync::Arc;

use shipsync_core::OrderId;
use shipsync_orders::Order;

use crate::error::StoreError;
use crate::filter::OrderQuery;

/// Query and hydration interface of the order store.
pub trait OrderStore: Send + Sync {
    /// Identifiers of orders matching `query`, ascending and without
    /// duplicates. With `query.limit` set, the result is the lowest
    /// `limit` matching ids, so a limited page is stable across stores.
    fn find_ids(&self, query: &OrderQuery) -> Result<Vec<OrderId>, StoreError>;

    /// Number of orders matching `query`, ignoring `query.limit`.
    fn count(&self, query: &OrderQuery) -> Result<u64, StoreError>;

    /// Fully populated order, or `None` if no such record exists.
    fn load(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn find_ids(&self, query: &OrderQuery) -> Result<Vec<OrderId>, StoreError> {
        (**self).find_ids(query)
    }

    fn count(&self, query: &OrderQuery) -> Result<u64, StoreError> {
        (**self).count(query)
    }

    fn load(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).load(id)
    }
}
