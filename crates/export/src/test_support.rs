//! Fixtures shared by this crate's unit tests.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};

use shipsync_core::OrderId;
use shipsync_orders::{Order, OrderStatus};

use crate::config::{ConfigProvider, ConfigValue};
use crate::error::StoreError;
use crate::filter::OrderQuery;
use crate::store::OrderStore;

pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Processing order created an hour before [`test_now`].
pub fn processing_order(id: u64) -> Order {
    Order::new(
        OrderId::new(id),
        OrderStatus::Processing,
        test_now() - Duration::hours(1),
    )
}

#[derive(Debug, Default)]
pub struct MapConfig(HashMap<String, ConfigValue>);

impl MapConfig {
    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
}

impl ConfigProvider for MapConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.0.get(key).cloned()
    }
}

/// Vec-backed store that evaluates queries directly. Records may be held in
/// any order; results follow the `OrderStore` contract.
#[derive(Debug, Default)]
pub struct VecStore {
    pub orders: Vec<Order>,
}

impl VecStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }
}

impl OrderStore for VecStore {
    fn find_ids(&self, query: &OrderQuery) -> Result<Vec<OrderId>, StoreError> {
        let mut ids: Vec<OrderId> = self
            .orders
            .iter()
            .filter(|o| query.matches(o))
            .map(|o| o.id())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        if let Some(limit) = query.limit {
            ids.truncate(limit);
        }
        Ok(ids)
    }

    fn count(&self, query: &OrderQuery) -> Result<u64, StoreError> {
        Ok(self.orders.iter().filter(|o| query.matches(o)).count() as u64)
    }

    fn load(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.iter().find(|o| o.id() == id).cloned())
    }
}

/// Store that fails every call.
pub struct BrokenStore;

impl OrderStore for BrokenStore {
    fn find_ids(&self, _query: &OrderQuery) -> Result<Vec<OrderId>, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    fn count(&self, _query: &OrderQuery) -> Result<u64, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    fn load(&self, _id: OrderId) -> Result<Option<Order>, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }
}
