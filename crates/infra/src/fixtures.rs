//! JSON fixture loading for previews and tests.

use std::fs;
use std::path::Path;

use thiserror::Error;

use shipsync_export::DeliveryService;
use shipsync_orders::Order;

use crate::catalog::StaticServiceCatalog;
use crate::store::InMemoryOrderStore;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a JSON array of orders.
pub fn orders_from_str(json: &str) -> Result<Vec<Order>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse a JSON array of `{label|name, code}` services.
pub fn services_from_str(json: &str) -> Result<Vec<DeliveryService>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn load_order_store(path: impl AsRef<Path>) -> Result<InMemoryOrderStore, FixtureError> {
    let orders = read_json(path.as_ref(), orders_from_str)?;
    tracing::debug!(orders = orders.len(), "loaded order fixture");
    Ok(InMemoryOrderStore::from_orders(orders))
}

pub fn load_service_catalog(path: impl AsRef<Path>) -> Result<StaticServiceCatalog, FixtureError> {
    let services = read_json(path.as_ref(), services_from_str)?;
    Ok(StaticServiceCatalog::new(services))
}

fn read_json<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> Result<T, FixtureError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: display.clone(),
        source,
    })?;
    parse(&raw).map_err(|source| FixtureError::Json {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipsync_core::OrderId;
    use shipsync_export::{DeliveryServiceCatalog, OrderStore};
    use shipsync_orders::OrderStatus;

    #[test]
    fn parses_orders_and_services() {
        let orders = orders_from_str(
            r#"[{"id": 2, "status": "wc-processing", "created_at": "2024-03-01T10:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(orders[0].id(), OrderId::new(2));
        assert_eq!(orders[0].status(), OrderStatus::Processing);

        let services = services_from_str(
            r#"[{"label": "Courier", "code": "DPD"}, {"name": "Post", "code": "CP"}]"#,
        )
        .unwrap();
        let catalog = StaticServiceCatalog::new(services);
        assert_eq!(catalog.services().unwrap().len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_order_store("/nonexistent/shipsync/orders.json").unwrap_err();
        match err {
            FixtureError::Io { path, .. } => assert!(path.ends_with("orders.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn loads_store_from_file() {
        let dir = std::env::temp_dir().join(format!("shipsync-fixture-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("orders.json");
        fs::write(
            &path,
            r#"[{"id": 7, "status": "processing", "created_at": "2024-03-01T10:00:00Z"}]"#,
        )
        .unwrap();

        let store = load_order_store(&path).unwrap();
        assert!(store.load(OrderId::new(7)).unwrap().is_some());

        fs::remove_dir_all(&dir).unwrap();
    }
}
