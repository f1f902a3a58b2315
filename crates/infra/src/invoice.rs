//! Invoice links recorded on the order by the invoicing integration.

use shipsync_export::InvoiceLinkLookup;
use shipsync_orders::{Order, meta_keys};

/// Reads the invoice link the invoicing integration stores as an order
/// attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaInvoiceLinks;

impl InvoiceLinkLookup for MetaInvoiceLinks {
    fn invoice_link(&self, order: &Order) -> Option<String> {
        order
            .meta()
            .get(meta_keys::INVOICE_LINK)
            .filter(|link| !link.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shipsync_core::OrderId;
    use shipsync_orders::OrderStatus;

    #[test]
    fn reads_link_attribute() {
        let order = Order::new(OrderId::new(1), OrderStatus::Processing, Utc::now())
            .with_meta(meta_keys::INVOICE_LINK, "https://invoices.example/1.pdf");
        assert_eq!(
            MetaInvoiceLinks.invoice_link(&order).as_deref(),
            Some("https://invoices.example/1.pdf")
        );

        let blank = Order::new(OrderId::new(2), OrderStatus::Processing, Utc::now())
            .with_meta(meta_keys::INVOICE_LINK, "");
        assert_eq!(MetaInvoiceLinks.invoice_link(&blank), None);
    }
}
