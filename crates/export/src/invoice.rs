//! Optional invoicing-integration capability.

use std::fmt;
use std::sync::Arc;

use shipsync_orders::Order;

/// Looks up the public invoice link of an order.
pub trait InvoiceLinkLookup: Send + Sync {
    fn invoice_link(&self, order: &Order) -> Option<String>;
}

/// Whether an invoicing integration is installed, decided at construction.
#[derive(Clone, Default)]
pub enum InvoiceLinkProvider {
    #[default]
    Absent,
    Active(Arc<dyn InvoiceLinkLookup>),
}

impl InvoiceLinkProvider {
    pub fn active(lookup: impl InvoiceLinkLookup + 'static) -> Self {
        Self::Active(Arc::new(lookup))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Invoice link for `order`; empty when the integration is absent or has
    /// no invoice for it.
    pub fn link_for(&self, order: &Order) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Active(lookup) => lookup.invoice_link(order).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for InvoiceLinkProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Active(_) => f.write_str("Active(..)"),
        }
    }
}
