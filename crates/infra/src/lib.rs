//! Infrastructure layer: stores, configuration and integration adapters.

pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod invoice;
pub mod store;


pub use catalog::StaticServiceCatalog;
pub use config::{EnvConfig, ExportSettings, StaticConfig};
pub use fixtures::FixtureError;
pub use invoice::MetaInvoiceLinks;
pub use store::InMemoryOrderStore;
