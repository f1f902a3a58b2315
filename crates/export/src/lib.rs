//! `shipsync-export` — order selection and payload projection.
//!
//! Decides which orders are due for export in a batch and maps each of them to
//! the flat payload the fulfilment API accepts. Storage, configuration, the
//! delivery-service catalog and the invoicing integration are collaborators
//! behind traits; see `shipsync-infra` for concrete implementations.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exporter;
pub mod filter;
pub mod invoice;
pub mod payload;
pub mod projector;
pub mod selector;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{DeliveryService, DeliveryServiceCatalog, DeliveryServiceMap};
pub use config::{ConfigProvider, ConfigValue};
pub use error::{ExportError, ExportResult, StoreError};
pub use exporter::OrderExporter;
pub use filter::{CreationWindow, MetaCompare, MetaFilter, OrderQuery};
pub use invoice::{InvoiceLinkLookup, InvoiceLinkProvider};
pub use payload::{EmbeddedItems, ExportPayload, PayloadItem};
pub use projector::OrderProjector;
pub use selector::{DEFAULT_EXPORT_LIMIT, ExportPolicy, OrderSelector, RecencyWindow};
pub use store::OrderStore;
