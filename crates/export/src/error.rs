//! Export error model.

use thiserror::Error;

use shipsync_core::OrderId;

/// Failure reported by a storage-side collaborator (order store, catalog).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or is in a broken state.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed to run a query.
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Order storage failed; fatal for the current call, never retried here.
    #[error("order store: {0}")]
    Store(#[from] StoreError),

    /// The delivery-service catalog could not be loaded at construction.
    #[error("delivery service catalog: {0}")]
    Catalog(StoreError),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),
}
