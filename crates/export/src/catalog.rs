//! Delivery-service catalog and label mapping.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A carrier service offered by the fulfilment API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryService {
    /// Human-readable label, as the shop shows it on the order's shipping line.
    #[serde(alias = "name")]
    pub label: String,
    /// Canonical service code expected by the API.
    pub code: String,
}

impl DeliveryService {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }
}

/// Source of the full set of delivery services.
pub trait DeliveryServiceCatalog: Send + Sync {
    fn services(&self) -> Result<Vec<DeliveryService>, StoreError>;
}

impl<C> DeliveryServiceCatalog for Arc<C>
where
    C: DeliveryServiceCatalog + ?Sized,
{
    fn services(&self) -> Result<Vec<DeliveryService>, StoreError> {
        (**self).services()
    }
}

/// Label → code lookup, built once from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryServiceMap {
    by_label: HashMap<String, String>,
}

impl DeliveryServiceMap {
    /// Build the map; on duplicate labels the later entry wins.
    pub fn from_services(services: impl IntoIterator<Item = DeliveryService>) -> Self {
        let mut by_label = HashMap::new();
        for service in services {
            if let Some(previous) = by_label.insert(service.label.clone(), service.code.clone()) {
                tracing::warn!(
                    label = %service.label,
                    previous = %previous,
                    code = %service.code,
                    "duplicate delivery service label; keeping the later code"
                );
            }
        }
        Self { by_label }
    }

    pub fn load(catalog: &dyn DeliveryServiceCatalog) -> Result<Self, StoreError> {
        Ok(Self::from_services(catalog.services()?))
    }

    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.by_label.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}
