use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use shipsync_core::OrderId;
use shipsync_export::{OrderQuery, OrderStore, StoreError};
use shipsync_orders::{Order, TrackingUpdate};

/// In-memory order store for tests, previews and embedding.
///
/// Records are kept ordered by id, so queries return ascending ids and a
/// limited query returns the lowest matching ids.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<BTreeMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            inner: RwLock::new(orders.into_iter().map(|o| (o.id(), o)).collect()),
        }
    }

    /// Insert or replace an order record.
    pub fn upsert(&self, order: Order) -> Result<(), StoreError> {
        let mut map = self.write()?;
        map.insert(order.id(), order);
        Ok(())
    }

    pub fn remove(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.write()?.remove(&id))
    }

    /// Apply a caller's tracking writeback. Returns `false` if the order is gone.
    pub fn record_tracking(&self, id: OrderId, update: &TrackingUpdate) -> Result<bool, StoreError> {
        let mut map = self.write()?;
        match map.get_mut(&id) {
            Some(order) => {
                order.meta_mut().apply(update);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<OrderId, Order>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::unavailable("order store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<OrderId, Order>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::unavailable("order store lock poisoned"))
    }
}

impl OrderStore for InMemoryOrderStore {
    fn find_ids(&self, query: &OrderQuery) -> Result<Vec<OrderId>, StoreError> {
        let map = self.read()?;
        let matching = map.values().filter(|o| query.matches(o)).map(|o| o.id());
        let ids: Vec<OrderId> = match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        };
        tracing::debug!(matched = ids.len(), limit = ?query.limit, "in-memory order query");
        Ok(ids)
    }

    fn count(&self, query: &OrderQuery) -> Result<u64, StoreError> {
        let map = self.read()?;
        Ok(map.values().filter(|o| query.matches(o)).count() as u64)
    }

    fn load(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.read()?.get(&id).cloned())
    }
}
