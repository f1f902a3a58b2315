//! Delivery-service catalog sources.

use shipsync_export::{DeliveryService, DeliveryServiceCatalog, StoreError};

/// Fixed list of services, e.g. loaded from a fixture or a settings page.
#[derive(Debug, Clone, Default)]
pub struct StaticServiceCatalog {
    services: Vec<DeliveryService>,
}

impl StaticServiceCatalog {
    pub fn new(services: Vec<DeliveryService>) -> Self {
        Self { services }
    }
}

impl FromIterator<DeliveryService> for StaticServiceCatalog {
    fn from_iter<I: IntoIterator<Item = DeliveryService>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DeliveryServiceCatalog for StaticServiceCatalog {
    fn services(&self) -> Result<Vec<DeliveryService>, StoreError> {
        Ok(self.services.clone())
    }
}
