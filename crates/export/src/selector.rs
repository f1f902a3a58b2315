//! Export selection policy.
//!
//! An order is due for export when all of the following hold:
//! - its status is one of the policy's statuses,
//! - it is not marked `synced` (absent, `error`, `deleted` all qualify),
//! - it is not already tagged with the current batch id,
//! - it was created inside the policy's recency window, if one is set.
//!
//! Failed orders are retried by every later batch; an order tagged with the
//! running batch is skipped so a batch never picks up its own work twice.

use chrono::{DateTime, Duration, Utc};

use shipsync_core::{BatchId, OrderId};
use shipsync_orders::{OrderStatus, SyncStatus, meta_keys};

use crate::error::StoreError;
use crate::filter::{CreationWindow, MetaFilter, OrderQuery};
use crate::store::OrderStore;

/// Batch size used when the caller does not pick one.
pub const DEFAULT_EXPORT_LIMIT: usize = 5;

/// Creation-time window relative to the moment of selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    /// Orders younger than this are left alone (payment/edits may still land).
    pub settle: Duration,
    /// Orders older than this are no longer picked up automatically.
    pub lookback: Duration,
}

impl RecencyWindow {
    pub fn at(&self, now: DateTime<Utc>) -> CreationWindow {
        CreationWindow {
            after: Some(now - self.lookback),
            before: Some(now - self.settle),
        }
    }
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self {
            settle: Duration::minutes(10),
            lookback: Duration::days(2),
        }
    }
}

/// Which orders an export run considers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPolicy {
    statuses: Vec<OrderStatus>,
    recency: Option<RecencyWindow>,
}

impl Default for ExportPolicy {
    /// Processing orders created between two days and ten minutes ago.
    fn default() -> Self {
        Self {
            statuses: vec![OrderStatus::Processing],
            recency: Some(RecencyWindow::default()),
        }
    }
}

impl ExportPolicy {
    /// Processing orders of any age.
    pub fn processing_only() -> Self {
        Self {
            statuses: vec![OrderStatus::Processing],
            recency: None,
        }
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = OrderStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_recency(mut self, recency: Option<RecencyWindow>) -> Self {
        self.recency = recency;
        self
    }

    pub fn statuses(&self) -> &[OrderStatus] {
        &self.statuses
    }

    pub fn recency(&self) -> Option<RecencyWindow> {
        self.recency
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderSelector {
    policy: ExportPolicy,
}

impl OrderSelector {
    pub fn new(policy: ExportPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ExportPolicy {
        &self.policy
    }

    /// Query for orders due for export in `batch`.
    pub fn export_query(&self, batch: &BatchId, limit: usize, now: DateTime<Utc>) -> OrderQuery {
        let query = OrderQuery::with_statuses(self.policy.statuses.iter().copied())
            .meta(MetaFilter::All(vec![
                MetaFilter::absent_or_not_equal(meta_keys::SYNC_STATUS, SyncStatus::Synced.as_str()),
                MetaFilter::absent_or_not_equal(meta_keys::EXPORT_BATCH, batch.as_str()),
            ]))
            .limit(limit);

        match self.policy.recency {
            Some(window) => query.created(window.at(now)),
            None => query,
        }
    }

    /// Query for reporting: every order in the policy's statuses, optionally
    /// narrowed to one sync status. No limit, no recency window.
    pub fn status_query(&self, status: Option<SyncStatus>) -> OrderQuery {
        let query = OrderQuery::with_statuses(self.policy.statuses.iter().copied());
        match status {
            Some(status) => query.meta(MetaFilter::equals(meta_keys::SYNC_STATUS, status.as_str())),
            None => query,
        }
    }

    /// Orders due for export: the lowest `limit` eligible ids, ascending.
    /// Ordering and uniqueness come from the [`OrderStore::find_ids`] contract.
    pub fn select_for_export<S: OrderStore + ?Sized>(
        &self,
        store: &S,
        batch: &BatchId,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<OrderId>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let query = self.export_query(batch, limit, now);
        let mut ids = store.find_ids(&query)?;
        ids.truncate(limit);
        tracing::debug!(batch = %batch, limit, selected = ids.len(), "selected orders for export");
        Ok(ids)
    }

    /// Every order in the policy's statuses (optionally one sync status), ascending by id.
    pub fn select_by_status<S: OrderStore + ?Sized>(
        &self,
        store: &S,
        status: Option<SyncStatus>,
    ) -> Result<Vec<OrderId>, StoreError> {
        store.find_ids(&self.status_query(status))
    }

    pub fn count<S: OrderStore + ?Sized>(
        &self,
        store: &S,
        status: Option<SyncStatus>,
    ) -> Result<u64, StoreError> {
        store.count(&self.status_query(status))
    }
}
