//! Order attributes and export tracking state.
//!
//! Tracking state is a handful of string attributes on the order. The export
//! pipeline only reads them; the caller that transmits a batch writes them
//! back through [`TrackingUpdate`].

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use shipsync_core::{BatchId, DomainError};

/// Attribute keys used for export tracking.
pub mod meta_keys {
    /// Outcome of the last transmission (`synced`, `error`, `deleted`).
    pub const SYNC_STATUS: &str = "fhb-api-status";
    /// Error message of the last failed transmission.
    pub const LAST_ERROR: &str = "fhb-api-error";
    /// Batch id of the last export run that picked the order up.
    pub const EXPORT_BATCH: &str = "fhb-api-export";
    /// Identifier the remote API assigned to the order.
    pub const REMOTE_ID: &str = "fhb-api-id";
    /// Token returned by the remote API.
    pub const TOKEN: &str = "fhb-api-token";
    /// Invoice link written by the invoicing integration.
    pub const INVOICE_LINK: &str = "wc_sf_invoice_regular";
}

/// Synchronisation outcome recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Synced,
    Error,
    Deleted,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Synced => "synced",
            SyncStatus::Error => "error",
            SyncStatus::Deleted => "deleted",
        }
    }
}

impl FromStr for SyncStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "synced" => Ok(SyncStatus::Synced),
            "error" => Ok(SyncStatus::Error),
            "deleted" => Ok(SyncStatus::Deleted),
            other => Err(DomainError::validation(format!("unknown sync status: {other}"))),
        }
    }
}

/// String attribute map attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderMeta(BTreeMap<String, String>);

impl OrderMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parsed sync status. Unknown values read as `None`.
    pub fn sync_status(&self) -> Option<SyncStatus> {
        self.get(meta_keys::SYNC_STATUS).and_then(|s| s.parse().ok())
    }

    pub fn export_batch(&self) -> Option<&str> {
        self.get(meta_keys::EXPORT_BATCH)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.get(meta_keys::LAST_ERROR)
    }

    pub fn remote_id(&self) -> Option<&str> {
        self.get(meta_keys::REMOTE_ID)
    }

    pub fn token(&self) -> Option<&str> {
        self.get(meta_keys::TOKEN)
    }

    /// Apply a caller-side tracking writeback.
    pub fn apply(&mut self, update: &TrackingUpdate) {
        for (key, value) in &update.set {
            self.insert(*key, value.clone());
        }
        for key in &update.clear {
            self.remove(key);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrderMeta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Tracking attributes a caller writes after transmitting a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingUpdate {
    set: Vec<(&'static str, String)>,
    clear: Vec<&'static str>,
}

impl TrackingUpdate {
    /// The remote API accepted the order.
    pub fn synced(batch: &BatchId, remote_id: impl Into<String>, token: Option<String>) -> Self {
        let mut set = vec![
            (meta_keys::SYNC_STATUS, SyncStatus::Synced.as_str().to_string()),
            (meta_keys::EXPORT_BATCH, batch.as_str().to_string()),
            (meta_keys::REMOTE_ID, remote_id.into()),
        ];
        if let Some(token) = token {
            set.push((meta_keys::TOKEN, token));
        }
        Self {
            set,
            clear: vec![meta_keys::LAST_ERROR],
        }
    }

    /// The remote API rejected the order; it stays eligible for later batches.
    pub fn failed(batch: &BatchId, error: impl Into<String>) -> Self {
        Self {
            set: vec![
                (meta_keys::SYNC_STATUS, SyncStatus::Error.as_str().to_string()),
                (meta_keys::EXPORT_BATCH, batch.as_str().to_string()),
                (meta_keys::LAST_ERROR, error.into()),
            ],
            clear: vec![],
        }
    }

    /// The order was removed on the remote side.
    pub fn deleted() -> Self {
        Self {
            set: vec![(meta_keys::SYNC_STATUS, SyncStatus::Deleted.as_str().to_string())],
            clear: vec![meta_keys::REMOTE_ID, meta_keys::TOKEN],
        }
    }
}
