//! Order domain module.
//!
//! The order record as the export pipeline sees it: shipping and billing
//! details, line items, and the string attribute map that carries export
//! tracking state. Pure data, no IO.

pub mod meta;
pub mod order;

pub use meta::{OrderMeta, SyncStatus, TrackingUpdate, meta_keys};
pub use order::{BillingDetails, LineItem, Order, OrderStatus, ShippingAddress, ShippingLine};
