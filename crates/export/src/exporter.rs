//! Export facade used by the sync driver.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use shipsync_core::{BatchId, OrderId};
use shipsync_orders::{Order, SyncStatus};

use crate::catalog::{DeliveryServiceCatalog, DeliveryServiceMap};
use crate::config::ConfigProvider;
use crate::error::{ExportError, ExportResult};
use crate::filter::OrderQuery;
use crate::invoice::InvoiceLinkProvider;
use crate::payload::ExportPayload;
use crate::projector::OrderProjector;
use crate::selector::{ExportPolicy, OrderSelector};
use crate::store::OrderStore;

/// Reads orders from a store and hands out export payloads.
///
/// Read-only: recording the outcome of a transmission is the caller's job.
pub struct OrderExporter<S>
where
    S: OrderStore,
{
    store: S,
    selector: OrderSelector,
    projector: OrderProjector,
}

impl<S> OrderExporter<S>
where
    S: OrderStore,
{
    /// Build an exporter; loads the delivery-service catalog once.
    pub fn new(
        store: S,
        catalog: &dyn DeliveryServiceCatalog,
        config: Arc<dyn ConfigProvider>,
        invoices: InvoiceLinkProvider,
        policy: ExportPolicy,
    ) -> ExportResult<Self> {
        let services = DeliveryServiceMap::load(catalog).map_err(ExportError::Catalog)?;
        tracing::debug!(
            services = services.len(),
            invoices = invoices.is_active(),
            "order exporter ready"
        );
        Ok(Self {
            store,
            selector: OrderSelector::new(policy),
            projector: OrderProjector::new(services, config, invoices),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selector(&self) -> &OrderSelector {
        &self.selector
    }

    /// Ids of orders due for export in `batch`.
    pub fn select_for_export(&self, batch: &BatchId, limit: usize) -> ExportResult<Vec<OrderId>> {
        self.select_for_export_at(batch, limit, Utc::now())
    }

    pub fn select_for_export_at(
        &self,
        batch: &BatchId,
        limit: usize,
        now: DateTime<Utc>,
    ) -> ExportResult<Vec<OrderId>> {
        Ok(self
            .selector
            .select_for_export(&self.store, batch, limit, now)?)
    }

    /// Payloads of the orders due for export in `batch`.
    pub fn fetch_for_export(
        &self,
        batch: &BatchId,
        limit: usize,
    ) -> ExportResult<Vec<ExportPayload>> {
        self.fetch_for_export_at(batch, limit, Utc::now())
    }

    pub fn fetch_for_export_at(
        &self,
        batch: &BatchId,
        limit: usize,
        now: DateTime<Utc>,
    ) -> ExportResult<Vec<ExportPayload>> {
        let ids = self.select_for_export_at(batch, limit, now)?;
        self.hydrate_and_project(ids)
    }

    /// Payloads of every order matching an arbitrary query, ascending by id.
    pub fn fetch(&self, query: &OrderQuery) -> ExportResult<Vec<ExportPayload>> {
        let ids = self.store.find_ids(query)?;
        self.hydrate_and_project(ids)
    }

    pub fn fetch_by_id(&self, id: OrderId) -> ExportResult<ExportPayload> {
        let order = self.store.load(id)?.ok_or(ExportError::OrderNotFound(id))?;
        Ok(self.project(&order))
    }

    pub fn project(&self, order: &Order) -> ExportPayload {
        self.projector.project(order)
    }

    /// Orders in the policy's statuses.
    pub fn count(&self) -> ExportResult<u64> {
        Ok(self.selector.count(&self.store, None)?)
    }

    /// Orders in the policy's statuses carrying `status`.
    pub fn count_by_status(&self, status: SyncStatus) -> ExportResult<u64> {
        Ok(self.selector.count(&self.store, Some(status))?)
    }

    pub fn count_synced(&self) -> ExportResult<u64> {
        self.count_by_status(SyncStatus::Synced)
    }

    pub fn count_error(&self) -> ExportResult<u64> {
        self.count_by_status(SyncStatus::Error)
    }

    fn hydrate_and_project(&self, ids: Vec<OrderId>) -> ExportResult<Vec<ExportPayload>> {
        let mut payloads = Vec::with_capacity(ids.len());
        for id in ids {
            match self.store.load(id)? {
                Some(order) => payloads.push(self.project(&order)),
                // Removed between query and load; nothing left to export.
                None => tracing::warn!(order_id = %id, "selected order vanished before hydration"),
            }
        }
        Ok(payloads)
    }
}
